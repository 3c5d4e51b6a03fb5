//! Control surface for Warden bot runtimes.
//!
//! [`ControlFacade`] keeps one [`warden_runtime::Runtime`] per credential
//! identity and exposes the dashboard operations (authenticate, set target,
//! start, stop, status) as plain async methods. Every operation answers with
//! a [`ControlResponse`] carrying a timestamped action log line, and state
//! changes are pushed to subscribers as [`ControlEvent`]s.
//!
//! [`SettingsStore`] persists credentials, communities, reactions, and the
//! protection list as JSON between sessions.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use warden_control::{BotSettings, ControlFacade};
//! use warden_runtime::NoOpPlatform;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let facade = ControlFacade::builder()
//!     .platform(Arc::new(NoOpPlatform::new()))
//!     .build()?;
//!
//! let form = BotSettings::new("bot", "pw", "key", "secret", "rust");
//! let response = facade.authenticate(form).await;
//! println!("{}", response.log);
//!
//! facade.start("bot").await;
//! println!("{:?}", facade.status(Some("bot")).await);
//! facade.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod events;
mod facade;
mod form;
mod response;
mod settings;

pub use events::ControlEvent;
pub use facade::{ControlFacade, ControlFacadeBuilder};
pub use form::BotSettings;
pub use response::{ControlResponse, DashboardStatus, ResponseStatus, log_action};
pub use settings::{Settings, SettingsStore};

//! Error types for the Warden bot runtime.
//!
//! This crate provides the error types used throughout the Warden workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use warden_error::{PlatformError, PlatformErrorKind, WardenResult};
//!
//! fn fetch_posts() -> WardenResult<Vec<String>> {
//!     Err(PlatformError::new(PlatformErrorKind::Unavailable("503".to_string())))?
//! }
//!
//! match fetch_posts() {
//!     Ok(posts) => println!("Got {} posts", posts.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod control;
mod credential;
mod error;
mod platform;
mod runtime;
mod settings;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use control::{ControlError, ControlErrorKind};
pub use credential::CredentialError;
pub use error::{WardenError, WardenErrorKind, WardenResult};
pub use platform::{FailureClass, PlatformError, PlatformErrorKind, PlatformResult};
pub use runtime::{RuntimeError, RuntimeErrorKind, RuntimeResult};
pub use settings::{SettingsError, SettingsErrorKind};

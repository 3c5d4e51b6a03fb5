//! Polling bot runtime for community reactions.
//!
//! A [`Runtime`] owns one credential identity. Once authenticated and started
//! it spawns a single worker task that repeatedly fetches the newest posts of
//! the configured community, skips protected or orphaned posts, applies the
//! configured reactions, and journals exactly one outcome per post.
//!
//! # Architecture
//!
//! - **Platform**: trait over the remote login, listing, and reaction primitives
//! - **Runtime**: Idle/Running/Stopping state machine plus the worker loop
//! - **Journal**: bounded activity log with lifetime counters
//! - **Events**: broadcast observations for push-style consumers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use warden_core::Credentials;
//! use warden_runtime::{NoOpPlatform, Runtime};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runtime = Runtime::builder()
//!     .platform(Arc::new(NoOpPlatform::new()))
//!     .credentials(Credentials::new("bot", "pw", "key", "secret", "warden/0.2"))
//!     .build()?;
//!
//! runtime.set_target("rust");
//! if runtime.run().await {
//!     println!("{:?}", runtime.status());
//!     runtime.stop();
//!     runtime.join().await;
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod event;
mod journal;
mod platform;
pub mod platforms;
mod policy;
mod runtime;
mod status;
mod worker;

pub use event::{RuntimeEvent, StopReason};
pub use journal::{Journal, OutcomeCounts};
pub use platform::Platform;
pub use platforms::{InMemoryPlatform, NoOpPlatform, RecordedReaction};
pub use policy::{LoopPolicy, LoopPolicyBuilder};
pub use runtime::{Runtime, RuntimeBuilder};
pub use status::{RuntimePhase, RuntimeStatus};

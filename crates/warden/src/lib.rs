//! Warden: a polling bot that reacts to new posts in an online community.
//!
//! Warden logs in with a set of credentials, watches the newest posts of one
//! community, and upvotes and/or replies to each one, skipping protected
//! authors and posts whose author was deleted. Every post resolves to exactly
//! one journal entry.
//!
//! # Architecture
//!
//! Warden is organized as a workspace with focused crates:
//!
//! - `warden_error` - Error types
//! - `warden_core` - Credentials, posts, configuration, journal entries
//! - `warden_runtime` - Platform trait and the poll-and-react runtime
//! - `warden_control` - Dashboard operations, push events, settings store
//!
//! This crate (`warden`) adds configuration loading, logging setup, and the
//! `warden` binary, and re-exports everything for convenience.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use warden::{Credentials, InMemoryPlatform, Post, Runtime};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let platform = Arc::new(
//!     InMemoryPlatform::new().with_posts("rust", vec![Post::new("1", Some("bob"))]),
//! );
//! let runtime = Runtime::builder()
//!     .platform(platform)
//!     .credentials(Credentials::new("bot", "pw", "key", "secret", "warden/0.2"))
//!     .build()?;
//!
//! runtime.set_target("rust");
//! runtime.run().await;
//! runtime.stop();
//! runtime.join().await;
//! println!("{:?}", runtime.journal());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;

pub use config::{
    CREDENTIAL_VARS, JournalConfig, LogConfig, WardenConfig, credentials_from, env_credentials,
};
pub use observability::{ObservabilityConfig, init_observability};

pub use warden_control::*;
pub use warden_core::*;
pub use warden_error::*;
pub use warden_runtime::*;

//! Core data types for the Warden bot runtime.
//!
//! This crate provides the records shared between the runtime, the control
//! facade, and platform implementations: credentials, the live runtime
//! configuration, posts, sessions, and activity journal entries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod journal;
mod post;
mod session;

pub use config::{ReactionPolicy, ReactionPolicyBuilder, RuntimeConfig, RuntimeConfigBuilder};
pub use credentials::Credentials;
pub use journal::{JournalEntry, Outcome, ReactionKind, SkipReason};
pub use post::{Post, PostBuilder, PostId};
pub use session::Session;

//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the warden binary.

mod check;
mod commands;
mod dry_run;

pub use check::check;
pub use commands::{Cli, Commands, DryRunArgs};
pub use dry_run::dry_run;

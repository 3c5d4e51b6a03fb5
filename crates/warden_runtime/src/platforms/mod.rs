//! Platform implementations that need no network access.

pub mod memory;
pub mod noop;

pub use memory::{InMemoryPlatform, RecordedReaction};
pub use noop::NoOpPlatform;

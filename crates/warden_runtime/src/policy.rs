//! Loop timing and batch policy.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use warden_error::ConfigError;

/// Batch size and wait intervals of the poll-and-react loop.
///
/// All intervals are whole seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use warden_runtime::{LoopPolicy, LoopPolicyBuilder};
///
/// let policy = LoopPolicy::default();
/// assert_eq!(*policy.batch_size(), 5);
/// assert_eq!(policy.outage_backoff(), Duration::from_secs(300));
///
/// let fast = LoopPolicyBuilder::default().cycle_interval_secs(10u64).build().unwrap();
/// assert!(fast.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct LoopPolicy {
    /// Posts requested per cycle.
    batch_size: usize,
    /// Wait after a processed batch and after a transient failure.
    cycle_interval_secs: u64,
    /// Wait while no target community is configured.
    idle_interval_secs: u64,
    /// Wait after the platform rejected a fetch.
    outage_backoff_secs: u64,
}

impl Default for LoopPolicy {
    fn default() -> Self {
        Self {
            batch_size: 5,
            cycle_interval_secs: 60,
            idle_interval_secs: 60,
            outage_backoff_secs: 300,
        }
    }
}

impl LoopPolicy {
    /// Wait between cycles.
    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }

    /// Wait while no target is configured.
    pub fn idle_interval(&self) -> Duration {
        Duration::from_secs(self.idle_interval_secs)
    }

    /// Wait after a platform outage.
    pub fn outage_backoff(&self) -> Duration {
        Duration::from_secs(self.outage_backoff_secs)
    }

    /// Check the policy for values that would make the loop spin or stall.
    ///
    /// # Errors
    ///
    /// Returns error if the batch size or an interval is zero, or if the
    /// outage backoff is shorter than the normal cycle interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::new("loop.batch_size must be at least 1"));
        }
        if self.cycle_interval_secs == 0 || self.idle_interval_secs == 0 {
            return Err(ConfigError::new("loop intervals must be at least 1 second"));
        }
        if self.outage_backoff_secs < self.cycle_interval_secs {
            return Err(ConfigError::new(format!(
                "loop.outage_backoff_secs ({}) must not be shorter than loop.cycle_interval_secs ({})",
                self.outage_backoff_secs, self.cycle_interval_secs
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_batch() {
        let policy = LoopPolicyBuilder::default().batch_size(0usize).build().unwrap();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn rejects_backoff_shorter_than_cycle() {
        let policy = LoopPolicyBuilder::default()
            .cycle_interval_secs(120u64)
            .outage_backoff_secs(60u64)
            .build()
            .unwrap();
        let err = policy.validate().unwrap_err();
        assert!(err.message.contains("outage_backoff_secs"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let policy: LoopPolicy = serde_json::from_str(r#"{"batch_size": 10}"#).unwrap();
        assert_eq!(*policy.batch_size(), 10);
        assert_eq!(*policy.outage_backoff_secs(), 300);
    }
}

use delve_nav::MovementRules;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest response queue that can hold the latest answer next to one stale answer that raced
/// past its staleness check.
pub const MIN_RESPONSE_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlanServiceConfig {
    /// Background worker threads. `0` plans inline on the sending thread, which keeps tests and
    /// replays fully deterministic.
    pub workers: usize,

    /// Capacity of each subscriber's response queue, at least [`MIN_RESPONSE_CAPACITY`].
    pub response_capacity: usize,

    pub rules: MovementRules,
}

impl Default for PlanServiceConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            response_capacity: 4,
            rules: MovementRules::default(),
        }
    }
}

impl PlanServiceConfig {
    pub fn inline() -> Self {
        Self {
            workers: 0,
            ..Self::default()
        }
    }
}

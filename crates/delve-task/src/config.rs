#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Runs a task may start before a failure drops it even when it asks to retry.
    pub max_attempts: Option<u32>,

    /// Record task and script events into the brain's [`delve_core::TraceLog`].
    pub record_trace: bool,
}

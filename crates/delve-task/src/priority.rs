use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Urgency tier of a task.
///
/// Ordering goes through [`Priority::rank`]: `Eventually < Low < Medium < High < Urgent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
    /// Background work picked up only when nothing else is feasible.
    Eventually,
}

impl Priority {
    /// Every tier, lowest rank first.
    pub const ALL: [Priority; 5] = [
        Priority::Eventually,
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Urgent,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            Priority::Eventually => 0,
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
        }
    }

    /// One tier down; `Eventually` is the floor.
    pub const fn demoted(self) -> Self {
        match self {
            Priority::Urgent => Priority::High,
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low | Priority::Eventually => Priority::Eventually,
        }
    }

    pub fn outranks(self, other: Priority) -> bool {
        self.rank() > other.rank()
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Eventually => "eventually",
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(name)
    }
}

use core::fmt::Debug;

/// Stable identifier for a creature.
///
/// Deterministic simulation requires:
/// - stable ordering (`Ord`) so agents are ticked in the same order every run
/// - a stable numeric ID (`stable_id`) for seeding, subscriber routing and logs
pub trait AgentId: Copy + Ord + Eq + Debug + 'static {
    fn stable_id(self) -> u64;
}

impl AgentId for u64 {
    fn stable_id(self) -> u64 {
        self
    }
}

impl AgentId for u32 {
    fn stable_id(self) -> u64 {
        self as u64
    }
}

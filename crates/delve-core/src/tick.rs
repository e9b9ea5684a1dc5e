use crate::{rng, AgentId, SplitMix64};

/// The simulation clock handed to every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
    pub seed: u64,
}

impl TickContext {
    pub fn new(tick: u64, dt_seconds: f32, seed: u64) -> Self {
        Self {
            tick,
            dt_seconds,
            seed,
        }
    }

    /// The clock for the following tick.
    pub fn next(self) -> Self {
        Self {
            tick: self.tick.wrapping_add(1),
            ..self
        }
    }

    /// A per-agent, per-tick random stream. Identical inputs always give the same sequence.
    pub fn rng_for_agent<A: AgentId>(&self, agent: A, stream: u64) -> SplitMix64 {
        let seed = rng::derive_seed(self.seed ^ self.tick, agent.stable_id(), stream);
        SplitMix64::new(seed)
    }
}

/// Deterministic RNG helpers.
///
/// Small and dependency-free. Not cryptographic.
pub trait DeterministicRng {
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `0..bound`. `bound == 0` yields `0`.
    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        ((self.next_u64() as u128 * bound as u128) >> 64) as u64
    }

    /// Uniform signed value in `-radius..=radius`.
    fn next_offset(&mut self, radius: u32) -> i32 {
        let span = (radius as u64) * 2 + 1;
        self.next_below(span) as i32 - radius as i32
    }
}

/// SplitMix64: a good seeding generator and a small deterministic stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl DeterministicRng for SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        mix64(self.state)
    }
}

pub fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

pub fn derive_seed(global_seed: u64, agent_id: u64, stream: u64) -> u64 {
    let x = global_seed ^ mix64(agent_id.wrapping_add(0x9E3779B97F4A7C15)) ^ mix64(stream);
    mix64(x)
}

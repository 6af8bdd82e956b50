//! Deterministic PRNG for the scramble flicker.
//!
//! SplitMix64. Good enough for visual noise, and a fixed seed keeps whole
//! runs reproducible without pulling in an RNG crate.

#[derive(Clone, Copy, Debug)]
pub struct FlickerRng {
    state: u64,
}

impl FlickerRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in [0, 1), 24 bits of precision.
    pub fn next_f32(&mut self) -> f32 {
        ((self.next_u64() >> 40) as f32) * (1.0 / ((1u64 << 24) as f32))
    }

    /// Uniform index in [0, n). `n` must be non-zero.
    pub fn next_index(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

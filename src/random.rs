//! Bounded pseudo-random numbers for the stochastic effects.

/// Source of uniformly distributed bounded integers
///
/// Effects receive the source through their context, so tests can swap in
/// a scripted one.
pub trait RandomSource {
    /// Draw an integer in `[min, max)`
    ///
    /// Returns `min` when the range is empty.
    fn range(&mut self, min: u32, max: u32) -> u32;
}

/// Seedable SplitMix64 generator
///
/// There is no implicit seeding: pick the seed at startup (hardware RNG,
/// boot counter, or a constant for reproducible output).
#[derive(Debug, Clone)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit output
    #[allow(clippy::cast_possible_truncation)]
    pub const fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        (z ^ (z >> 31)) as u32
    }
}

impl RandomSource for SplitMix {
    #[allow(clippy::cast_possible_truncation)]
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min;

        // Multiply-shift with rejection of the biased low region.
        let mut product = u64::from(self.next_u32()) * u64::from(span);
        if (product as u32) < span {
            let threshold = span.wrapping_neg() % span;
            while (product as u32) < threshold {
                product = u64::from(self.next_u32()) * u64::from(span);
            }
        }
        min + (product >> 32) as u32
    }
}

//! Comet racer
//!
//! Stateless: every pixel is computed from the comet length and written
//! straight to the wire. The framebuffer is neither read nor modified.

use embassy_time::Duration;

use super::{Effect, EffectContext, StepResult};
use crate::{
    color::{BLACK, Rgb, multiply_saturating},
    driver::StripDriver,
    random::RandomSource,
    transport::Transport,
};

const DEFAULT_FRAME_DELAY_MS: u64 = 5;

/// Brightness gained per pixel towards the head
const TAIL_GRADIENT: usize = 4;

/// Color of pixel `index` when the comet has grown to `length`
///
/// The head sits at `index == length` with brightness factor `4 * N`; each
/// pixel behind it is 4 lower, clamped at zero. Pixels ahead of the head are
/// dark. Channel products saturate at 255.
pub fn comet_pixel(color: Rgb, strip_len: usize, length: usize, index: usize) -> Rgb {
    if index > length {
        return BLACK;
    }
    let phase = (strip_len + index).saturating_sub(length) * TAIL_GRADIENT;
    multiply_saturating(color, u32::try_from(phase).unwrap_or(u32::MAX))
}

/// Comet growing along the strip for `3 * N` frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CometRacerEffect {
    color: Rgb,
    frame_delay: Duration,
    length: usize,
}

impl CometRacerEffect {
    /// `color` is a per-channel multiplier; `(1, 0, 0)` gives a red comet
    /// whose head brightness is `4 * N`
    pub const fn new(color: Rgb) -> Self {
        Self {
            color,
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            length: 0,
        }
    }

    #[must_use]
    pub const fn with_frame_delay(mut self, frame_delay: Duration) -> Self {
        self.frame_delay = frame_delay;
        self
    }
}

impl Effect for CometRacerEffect {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        _ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        let length = self.length;
        if length >= 3 * N {
            return Ok(None);
        }
        self.length += 1;

        let color = self.color;
        driver.render_pixels((0..N).map(|index| comet_pixel(color, N, length, index)))?;
        Ok(Some(self.frame_delay))
    }

    fn reset(&mut self) {
        self.length = 0;
    }
}

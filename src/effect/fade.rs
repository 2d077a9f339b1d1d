//! Whole-strip fade in and out of a single color

use embassy_time::Duration;

use super::{Effect, EffectContext, StepResult};
use crate::{
    color::{Rgb, scale_linear},
    driver::StripDriver,
    random::RandomSource,
    transport::Transport,
};

/// Brightness step while fading out
const FADE_OUT_STEP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FadePhase {
    In(u8),
    Out(u8),
    Done,
}

/// Fades the whole strip from black up to `color` one level at a time, then
/// back down two levels at a time
///
/// The fade-out visits 255, 253, ..., 1 and never renders level 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FadeInOutEffect {
    color: Rgb,
    step_delay: Duration,
    phase: FadePhase,
}

impl FadeInOutEffect {
    pub const fn new(color: Rgb) -> Self {
        Self {
            color,
            step_delay: Duration::from_millis(0),
            phase: FadePhase::In(0),
        }
    }

    /// Pause after every brightness level
    #[must_use]
    pub const fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Advance the phase, returning the level to render
    fn next_level(&mut self) -> Option<u8> {
        let (level, next) = match self.phase {
            FadePhase::In(k) if k == u8::MAX => (k, FadePhase::Out(u8::MAX)),
            FadePhase::In(k) => (k, FadePhase::In(k + 1)),
            FadePhase::Out(k) => match k.checked_sub(FADE_OUT_STEP) {
                Some(next) => (k, FadePhase::Out(next)),
                None => (k, FadePhase::Done),
            },
            FadePhase::Done => return None,
        };
        self.phase = next;
        Some(level)
    }
}

impl Effect for FadeInOutEffect {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        let Some(level) = self.next_level() else {
            return Ok(None);
        };

        ctx.frame.fill(scale_linear(self.color, level));
        driver.render(&ctx.frame)?;
        Ok(Some(self.step_delay))
    }

    fn reset(&mut self) {
        self.phase = FadePhase::In(0);
    }
}

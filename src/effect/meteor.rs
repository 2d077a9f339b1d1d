//! Meteor rain: a solid head followed by a fading trail

use embassy_time::Duration;

use super::{Effect, EffectContext, StepResult};
use crate::{color::Rgb, driver::StripDriver, random::RandomSource, transport::Transport};

const DEFAULT_SIZE: usize = 10;
const DEFAULT_TRAIL_DECAY: u8 = 64;
const DEFAULT_FRAME_DELAY_MS: u64 = 30;

/// Draws in `[0, 10)` above this value leave a trail pixel undimmed
const DECAY_SKIP_THRESHOLD: u32 = 5;

/// Meteor crossing the strip from index 0 upwards
///
/// The head travels for `2 * N` frames so the trail has left the strip
/// before the effect ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeteorRainEffect {
    color: Rgb,
    size: usize,
    trail_decay: u8,
    random_decay: bool,
    frame_delay: Duration,
    position: usize,
}

impl MeteorRainEffect {
    /// # Arguments
    /// * `color` - Head color
    /// * `size` - Head length in pixels
    /// * `trail_decay` - How much the trail dims per frame, out of 256
    /// * `random_decay` - Randomly skip dimming trail pixels for a sparkle
    /// * `frame_delay` - Pause after every frame
    pub const fn new(
        color: Rgb,
        size: usize,
        trail_decay: u8,
        random_decay: bool,
        frame_delay: Duration,
    ) -> Self {
        Self {
            color,
            size,
            trail_decay,
            random_decay,
            frame_delay,
            position: 0,
        }
    }

    /// Meteor of the given color with default shape and speed
    pub const fn with_color(color: Rgb) -> Self {
        Self::new(
            color,
            DEFAULT_SIZE,
            DEFAULT_TRAIL_DECAY,
            true,
            Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
        )
    }
}

impl Effect for MeteorRainEffect {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        let head = self.position;
        if head >= 2 * N {
            return Ok(None);
        }
        self.position += 1;

        if head == 0 {
            ctx.frame.clear();
        }

        for index in 0..N {
            let skip = self.random_decay && ctx.rng.range(0, 10) > DECAY_SKIP_THRESHOLD;
            if !skip {
                ctx.frame.fade_to_black(index, self.trail_decay);
            }
        }

        for offset in 0..self.size {
            if let Some(index) = head.checked_sub(offset).filter(|&index| index < N) {
                ctx.frame.set(index, self.color);
            }
        }

        driver.render(&ctx.frame)?;
        Ok(Some(self.frame_delay))
    }

    fn reset(&mut self) {
        self.position = 0;
    }
}

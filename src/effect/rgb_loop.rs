//! Single-channel ramps: red, then green, then blue

use embassy_time::Duration;

use super::{Effect, EffectContext, StepResult};
use crate::{color::Rgb, driver::StripDriver, random::RandomSource, transport::Transport};

const DEFAULT_STEP_DELAY_MS: u64 = 3;

/// Channels in the order they are ramped
const CHANNELS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ramp {
    Up(u8),
    Down(u8),
}

/// Ramps each channel 0 → 255 → 0 with the other two held dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbLoopEffect {
    step_delay: Duration,
    channel: usize,
    ramp: Ramp,
}

impl Default for RgbLoopEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl RgbLoopEffect {
    pub const fn new() -> Self {
        Self {
            step_delay: Duration::from_millis(DEFAULT_STEP_DELAY_MS),
            channel: 0,
            ramp: Ramp::Up(0),
        }
    }

    #[must_use]
    pub const fn with_step_delay(mut self, step_delay: Duration) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Advance the ramp, returning the color to render
    fn next_color(&mut self) -> Option<Rgb> {
        if self.channel >= CHANNELS {
            return None;
        }

        let channel = self.channel;
        let level = match self.ramp {
            Ramp::Up(k) => {
                self.ramp = if k == u8::MAX { Ramp::Down(k) } else { Ramp::Up(k + 1) };
                k
            }
            Ramp::Down(0) => {
                self.channel += 1;
                self.ramp = Ramp::Up(0);
                0
            }
            Ramp::Down(k) => {
                self.ramp = Ramp::Down(k - 1);
                k
            }
        };
        Some(channel_color(channel, level))
    }
}

const fn channel_color(channel: usize, level: u8) -> Rgb {
    match channel {
        0 => Rgb { r: level, g: 0, b: 0 },
        1 => Rgb { r: 0, g: level, b: 0 },
        _ => Rgb { r: 0, g: 0, b: level },
    }
}

impl Effect for RgbLoopEffect {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        let Some(color) = self.next_color() else {
            return Ok(None);
        };

        ctx.frame.fill(color);
        driver.render(&ctx.frame)?;
        Ok(Some(self.step_delay))
    }

    fn reset(&mut self) {
        self.channel = 0;
        self.ramp = Ramp::Up(0);
    }
}

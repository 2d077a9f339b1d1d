//! Fire simulation
//!
//! A one-dimensional heat map is cooled, diffused upwards and occasionally
//! ignited near the base every frame, then mapped through a three-band
//! palette. The heat map lives in the effect context, so it carries over
//! between frames and between runs of the effect.

use embassy_time::Duration;

use super::{Effect, EffectContext, StepResult};
use crate::{
    color::Rgb, driver::StripDriver, frame::FrameBuffer, random::RandomSource,
    transport::Transport,
};

const DEFAULT_COOLING: u8 = 55;
const DEFAULT_SPARKING: u8 = 120;
const DEFAULT_FRAME_DELAY_MS: u64 = 15;

/// Frames played when fire is started by id: about 7.5 s at the default delay
pub const DEFAULT_RUN_FRAMES: u32 = 500;

/// Sparks are only lit in the lowest cells
const IGNITION_ZONE: usize = 8;
const SPARK_MIN: u32 = 160;
const SPARK_MAX: u32 = 255;

/// Per-cell temperature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatMap<const N: usize> {
    cells: [u8; N],
}

impl<const N: usize> Default for HeatMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> HeatMap<N> {
    pub const fn new() -> Self {
        Self { cells: [0; N] }
    }

    pub const fn from_cells(cells: [u8; N]) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> u8 {
        self.cells[index]
    }

    pub const fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    /// Subtract a random cooldown from every cell, stopping at zero
    ///
    /// The cooldown is drawn from `[0, cooling * 10 / N + 2)`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn cool<R: RandomSource>(&mut self, cooling: u8, rng: &mut R) {
        if N == 0 {
            return;
        }
        let len = u32::try_from(N).unwrap_or(u32::MAX);
        let max_cooldown = u32::from(cooling) * 10 / len + 2;

        for cell in &mut self.cells {
            let cooldown = rng.range(0, max_cooldown);
            *cell = u32::from(*cell).saturating_sub(cooldown) as u8;
        }
    }

    /// Drift heat upwards in a single in-place sweep from the top down
    ///
    /// Must stay a single pass over the live array: each cell reads its two
    /// lower neighbours as they are at the moment it is visited.
    #[allow(clippy::cast_possible_truncation)]
    pub fn diffuse(&mut self) {
        for k in (2..N).rev() {
            let sum = u16::from(self.cells[k - 1]) + 2 * u16::from(self.cells[k - 2]);
            self.cells[k] = (sum / 3) as u8;
        }
    }

    /// With probability `sparking / 255`, add a spark to one of the lowest
    /// cells
    #[allow(clippy::cast_possible_truncation)]
    pub fn ignite<R: RandomSource>(&mut self, sparking: u8, rng: &mut R) {
        if N == 0 {
            return;
        }
        if rng.range(0, 255) >= u32::from(sparking) {
            return;
        }

        let zone = u32::try_from(IGNITION_ZONE.min(N)).unwrap_or(u32::MAX);
        let index = rng.range(0, zone) as usize;
        let spark = rng.range(SPARK_MIN, SPARK_MAX) as u8;
        self.cells[index] = self.cells[index].saturating_add(spark);
    }
}

/// Palette color for a heat value already scaled to `0..=191`
///
/// Above 128 the cell is white-hot, above 64 orange, otherwise dim red. The
/// low six bits brighten the color within each band.
pub const fn palette_color(scaled: u8) -> Rgb {
    let ramp = (scaled & 0x3F) << 2;
    if scaled > 0x80 {
        Rgb { r: 255, g: 255, b: ramp }
    } else if scaled > 0x40 {
        Rgb { r: 255, g: ramp, b: 0 }
    } else {
        Rgb { r: ramp, g: 0, b: 0 }
    }
}

/// Map a cell temperature to its color
#[allow(clippy::cast_possible_truncation)]
pub const fn heat_color(heat: u8) -> Rgb {
    let scaled = (heat as u16 * 191 / 255) as u8;
    palette_color(scaled)
}

/// Fire simulation effect
///
/// Each step is one simulation frame. The effect runs one frame per start
/// unless [`FireEffect::with_frames`] asks for more. Started through
/// [`EffectId::to_slot`](super::EffectId::to_slot) it runs [`DEFAULT_RUN_FRAMES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireEffect {
    cooling: u8,
    sparking: u8,
    frame_delay: Duration,
    frames: u32,
    rendered: u32,
}

impl Default for FireEffect {
    fn default() -> Self {
        Self::new(
            DEFAULT_COOLING,
            DEFAULT_SPARKING,
            Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
        )
    }
}

impl FireEffect {
    /// # Arguments
    /// * `cooling` - How fast the flame cools down; higher gives shorter flames
    /// * `sparking` - Chance out of 255 that a new spark is lit each frame
    /// * `frame_delay` - Pause after every frame
    pub const fn new(cooling: u8, sparking: u8, frame_delay: Duration) -> Self {
        Self {
            cooling,
            sparking,
            frame_delay,
            frames: 1,
            rendered: 0,
        }
    }

    /// Number of frames to simulate before the effect finishes
    #[must_use]
    pub const fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Run one simulation frame: cool, diffuse, ignite, colorize
    pub fn simulate<const N: usize, R: RandomSource>(
        &self,
        heat: &mut HeatMap<N>,
        frame: &mut FrameBuffer<N>,
        rng: &mut R,
    ) {
        heat.cool(self.cooling, rng);
        heat.diffuse();
        heat.ignite(self.sparking, rng);

        for (index, &cell) in heat.as_slice().iter().enumerate() {
            frame.set(index, heat_color(cell));
        }
    }
}

impl Effect for FireEffect {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        if self.rendered >= self.frames {
            return Ok(None);
        }
        self.rendered += 1;

        self.simulate(&mut ctx.heat, &mut ctx.frame, &mut ctx.rng);
        driver.render(&ctx.frame)?;
        Ok(Some(self.frame_delay))
    }

    fn reset(&mut self) {
        self.rendered = 0;
    }
}

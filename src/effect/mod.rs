//! Effect system with compile-time known effect variants
//!
//! Every effect is a small state machine. One call to [`Effect::step`]
//! computes one frame, renders it and returns how long to wait before the
//! next call. Sleeping is left to the caller, so effects can be driven by
//! [`run_to_completion`], by the [`Sequencer`](crate::Sequencer) or by a test.

mod comet;
mod fade;
mod fire;
mod meteor;
mod rgb_loop;

pub use comet::{CometRacerEffect, comet_pixel};
pub use fade::FadeInOutEffect;
pub use fire::{DEFAULT_RUN_FRAMES, FireEffect, HeatMap, heat_color, palette_color};
pub use meteor::MeteorRainEffect;
pub use rgb_loop::RgbLoopEffect;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;

use crate::{
    color::Rgb,
    driver::StripDriver,
    frame::FrameBuffer,
    random::RandomSource,
    transport::{TransmitError, Transport},
};

const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_METEOR_RAIN: &str = "meteor_rain";
const EFFECT_NAME_FADE_IN_OUT: &str = "fade_in_out";
const EFFECT_NAME_RGB_LOOP: &str = "rgb_loop";
const EFFECT_NAME_COMET_RACER: &str = "comet_racer";

const EFFECT_ID_FIRE: u8 = 0;
const EFFECT_ID_METEOR_RAIN: u8 = 1;
const EFFECT_ID_FADE_IN_OUT: u8 = 2;
const EFFECT_ID_RGB_LOOP: u8 = 3;
const EFFECT_ID_COMET_RACER: u8 = 4;

/// Result of one effect step: the pause after the rendered frame, or `None`
/// once the effect has finished and rendered nothing
pub type StepResult<E> = Result<Option<Duration>, TransmitError<E>>;

/// State shared by all effects
///
/// Owns the framebuffer, the fire heat map and the random source. There is
/// exactly one context per strip.
pub struct EffectContext<const N: usize, R> {
    pub frame: FrameBuffer<N>,
    pub heat: HeatMap<N>,
    pub rng: R,
}

impl<const N: usize, R: RandomSource> EffectContext<N, R> {
    pub const fn new(rng: R) -> Self {
        Self {
            frame: FrameBuffer::new(),
            heat: HeatMap::new(),
            rng,
        }
    }
}

pub trait Effect {
    /// Compute and render the next frame
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error>;

    /// Rewind to the first frame
    fn reset(&mut self);
}

/// Run an effect frame by frame, sleeping between frames, until it finishes
pub fn run_to_completion<E, const N: usize, R, T, D>(
    effect: &mut E,
    ctx: &mut EffectContext<N, R>,
    driver: &mut StripDriver<T>,
    delay: &mut D,
) -> Result<(), TransmitError<T::Error>>
where
    E: Effect,
    R: RandomSource,
    T: Transport,
    D: DelayNs,
{
    while let Some(pause) = effect.step(ctx, driver)? {
        delay_for(delay, pause);
    }
    Ok(())
}

/// Block for `duration` with millisecond resolution
pub(crate) fn delay_for<D: DelayNs>(delay: &mut D, duration: Duration) {
    let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
    delay.delay_ms(ms);
}

/// Effect slot - enum containing all possible effects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectSlot {
    /// Heat simulation with a white/orange/red palette
    Fire(FireEffect),
    /// Bright head with a decaying, optionally sparkling trail
    MeteorRain(MeteorRainEffect),
    /// Whole strip fades a color in, then out
    FadeInOut(FadeInOutEffect),
    /// Red, green, blue ramps one after another
    RgbLoop(RgbLoopEffect),
    /// Comet rendered straight to the wire
    CometRacer(CometRacerEffect),
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Fire = EFFECT_ID_FIRE,
    MeteorRain = EFFECT_ID_METEOR_RAIN,
    FadeInOut = EFFECT_ID_FADE_IN_OUT,
    RgbLoop = EFFECT_ID_RGB_LOOP,
    CometRacer = EFFECT_ID_COMET_RACER,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_FIRE => Self::Fire,
            EFFECT_ID_METEOR_RAIN => Self::MeteorRain,
            EFFECT_ID_FADE_IN_OUT => Self::FadeInOut,
            EFFECT_ID_RGB_LOOP => Self::RgbLoop,
            EFFECT_ID_COMET_RACER => Self::CometRacer,
            _ => return None,
        })
    }

    /// Build the effect with its default parameters
    ///
    /// `color` is ignored by effects that pick their own colors.
    pub fn to_slot(self, color: Rgb) -> EffectSlot {
        match self {
            Self::Fire => {
                EffectSlot::Fire(FireEffect::default().with_frames(DEFAULT_RUN_FRAMES))
            }
            Self::MeteorRain => EffectSlot::MeteorRain(MeteorRainEffect::with_color(color)),
            Self::FadeInOut => EffectSlot::FadeInOut(FadeInOutEffect::new(color)),
            Self::RgbLoop => EffectSlot::RgbLoop(RgbLoopEffect::new()),
            Self::CometRacer => EffectSlot::CometRacer(CometRacerEffect::new(color)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => EFFECT_NAME_FIRE,
            Self::MeteorRain => EFFECT_NAME_METEOR_RAIN,
            Self::FadeInOut => EFFECT_NAME_FADE_IN_OUT,
            Self::RgbLoop => EFFECT_NAME_RGB_LOOP,
            Self::CometRacer => EFFECT_NAME_COMET_RACER,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_FIRE => Some(Self::Fire),
            EFFECT_NAME_METEOR_RAIN => Some(Self::MeteorRain),
            EFFECT_NAME_FADE_IN_OUT => Some(Self::FadeInOut),
            EFFECT_NAME_RGB_LOOP => Some(Self::RgbLoop),
            EFFECT_NAME_COMET_RACER => Some(Self::CometRacer),
            _ => None,
        }
    }
}

impl EffectSlot {
    /// Get the effect ID for external observation
    pub fn id(&self) -> EffectId {
        match self {
            Self::Fire(_) => EffectId::Fire,
            Self::MeteorRain(_) => EffectId::MeteorRain,
            Self::FadeInOut(_) => EffectId::FadeInOut,
            Self::RgbLoop(_) => EffectId::RgbLoop,
            Self::CometRacer(_) => EffectId::CometRacer,
        }
    }
}

impl Effect for EffectSlot {
    fn step<const N: usize, R: RandomSource, T: Transport>(
        &mut self,
        ctx: &mut EffectContext<N, R>,
        driver: &mut StripDriver<T>,
    ) -> StepResult<T::Error> {
        match self {
            Self::Fire(effect) => effect.step(ctx, driver),
            Self::MeteorRain(effect) => effect.step(ctx, driver),
            Self::FadeInOut(effect) => effect.step(ctx, driver),
            Self::RgbLoop(effect) => effect.step(ctx, driver),
            Self::CometRacer(effect) => effect.step(ctx, driver),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Fire(effect) => effect.reset(),
            Self::MeteorRain(effect) => effect.reset(),
            Self::FadeInOut(effect) => effect.reset(),
            Self::RgbLoop(effect) => effect.reset(),
            Self::CometRacer(effect) => effect.reset(),
        }
    }
}

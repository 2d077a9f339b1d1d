//! Effect selection.
//!
//! The sequencer replaces a hard-coded "play this, then that, forever" loop
//! with an explicit state machine: a playlist of effect slots, the currently
//! running slot, and an optional queue of requested effects. Each
//! [`Sequencer::tick`] renders one frame and returns how long the caller
//! must wait before the next tick.

use core::convert::Infallible;

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    color::Rgb,
    driver::StripDriver,
    effect::{CometRacerEffect, Effect, EffectContext, EffectId, EffectSlot, delay_for},
    queue::EffectQueue,
    random::RandomSource,
    transport::{TransmitError, Transport},
};

/// Playlist capacity used when none is given
pub const DEFAULT_PLAYLIST_SIZE: usize = 8;

/// Request queue capacity used when none is given
pub const DEFAULT_QUEUE_SIZE: usize = 4;

/// Configuration for the sequencer
#[derive(Debug, Clone)]
pub struct SequencerConfig<const PLAYLIST: usize> {
    /// Effects played in order, wrapping around forever
    pub playlist: Vec<EffectSlot, PLAYLIST>,
}

impl<const PLAYLIST: usize> SequencerConfig<PLAYLIST> {
    pub const fn new(playlist: Vec<EffectSlot, PLAYLIST>) -> Self {
        Self { playlist }
    }

    /// Red, green and blue comets, one after another
    ///
    /// Entries that do not fit into `PLAYLIST` are left out.
    pub fn comet_cycle() -> Self {
        let mut playlist = Vec::new();
        for color in [Rgb::new(1, 0, 0), Rgb::new(0, 1, 0), Rgb::new(0, 0, 1)] {
            if playlist
                .push(EffectSlot::CometRacer(CometRacerEffect::new(color)))
                .is_err()
            {
                break;
            }
        }
        Self { playlist }
    }
}

impl<const PLAYLIST: usize> Default for SequencerConfig<PLAYLIST> {
    fn default() -> Self {
        Self::comet_cycle()
    }
}

/// Runs effects one after another
///
/// An effect, once started, always runs to completion. Requests only take
/// over at the boundary between two effects, after which the playlist
/// resumes where it left off.
pub struct Sequencer<
    'a,
    T,
    R,
    const N: usize,
    const PLAYLIST: usize = DEFAULT_PLAYLIST_SIZE,
    const QUEUE: usize = DEFAULT_QUEUE_SIZE,
> {
    // External dependencies and configuration
    driver: StripDriver<T>,
    requests: Option<&'a EffectQueue<QUEUE>>,
    playlist: Vec<EffectSlot, PLAYLIST>,

    // Internal state
    context: EffectContext<N, R>,
    current: Option<EffectSlot>,
    next_index: usize,
}

impl<'a, T, R, const N: usize, const PLAYLIST: usize, const QUEUE: usize>
    Sequencer<'a, T, R, N, PLAYLIST, QUEUE>
where
    T: Transport,
    R: RandomSource,
{
    pub fn new(
        driver: StripDriver<T>,
        context: EffectContext<N, R>,
        config: SequencerConfig<PLAYLIST>,
    ) -> Self {
        Self {
            driver,
            requests: None,
            playlist: config.playlist,
            context,
            current: None,
            next_index: 0,
        }
    }

    /// Take effect requests from `queue`
    #[must_use]
    pub fn with_requests(mut self, queue: &'a EffectQueue<QUEUE>) -> Self {
        self.requests = Some(queue);
        self
    }

    /// Render one frame of the current effect
    ///
    /// Starts the next effect when the current one has finished. Returns the
    /// pause that must follow the frame, or zero if there is nothing to play.
    pub fn tick(&mut self) -> Result<Duration, TransmitError<T::Error>> {
        // Every queued or listed effect may finish without a frame (e.g. on an
        // empty strip); give each of them one chance per tick.
        for _ in 0..=PLAYLIST + QUEUE {
            if self.current.is_none() {
                self.current = self.next_effect();
            }
            let Some(effect) = self.current.as_mut() else {
                return Ok(Duration::from_millis(0));
            };

            if let Some(pause) = effect.step(&mut self.context, &mut self.driver)? {
                return Ok(pause);
            }

            #[cfg(feature = "esp32-log")]
            println!("[Sequencer] finished {}", effect.id().as_str());
            self.current = None;
        }
        Ok(Duration::from_millis(0))
    }

    /// Tick forever, sleeping between frames
    pub fn run<D: DelayNs>(&mut self, delay: &mut D) -> Result<Infallible, TransmitError<T::Error>> {
        loop {
            let pause = self.tick()?;
            delay_for(delay, pause);
        }
    }

    /// Id of the effect currently running
    pub fn current_id(&self) -> Option<EffectId> {
        self.current.as_ref().map(EffectSlot::id)
    }

    pub const fn context(&self) -> &EffectContext<N, R> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut EffectContext<N, R> {
        &mut self.context
    }

    pub const fn driver(&self) -> &StripDriver<T> {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut StripDriver<T> {
        &mut self.driver
    }

    /// Pick the next effect: a pending request first, then the playlist
    fn next_effect(&mut self) -> Option<EffectSlot> {
        if let Some(mut requested) = self.requests.and_then(EffectQueue::next_request) {
            #[cfg(feature = "esp32-log")]
            println!("[Sequencer] starting requested {}", requested.id().as_str());
            requested.reset();
            return Some(requested);
        }

        let mut slot = self.playlist.get(self.next_index)?.clone();
        self.next_index = (self.next_index + 1) % self.playlist.len();
        #[cfg(feature = "esp32-log")]
        println!("[Sequencer] starting {}", slot.id().as_str());
        slot.reset();
        Some(slot)
    }
}

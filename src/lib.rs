#![no_std]

pub mod color;
pub mod driver;
pub mod effect;
pub mod encoder;
pub mod frame;
pub mod queue;
pub mod random;
pub mod sequencer;
pub mod timing;
pub mod transport;

pub use color::Rgb;
pub use driver::StripDriver;
pub use effect::{
    CometRacerEffect, Effect, EffectContext, EffectId, EffectSlot, FadeInOutEffect, FireEffect,
    HeatMap, MeteorRainEffect, RgbLoopEffect, run_to_completion,
};
pub use encoder::{SignalEncoder, decode_nibble, encode_nibble};
pub use frame::FrameBuffer;
pub use queue::{EffectQueue, QueueFull, Requester};
pub use random::{RandomSource, SplitMix};
pub use sequencer::{Sequencer, SequencerConfig};
pub use transport::{SpiTransport, TransmitError, Transport};

pub use embassy_time::Duration;

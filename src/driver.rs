//! Frame output with the reset-pulse protocol.
//!
//! A frame is: a run of all-zero words (the latch/reset low time), then every
//! pixel in strip order as green, red, blue. Once the first pixel byte is on
//! the wire the rest must follow without a gap longer than the strip's reset
//! threshold, otherwise the LEDs latch half a frame. The whole frame is
//! therefore sent inside a critical section.

use crate::{
    color::Rgb,
    encoder::SignalEncoder,
    frame::FrameBuffer,
    timing::DEFAULT_RESET_WORDS,
    transport::{TransmitError, Transport},
};

/// Renders pixels to the strip through a [`SignalEncoder`]
pub struct StripDriver<T> {
    encoder: SignalEncoder<T>,
    reset_words: usize,
}

impl<T: Transport> StripDriver<T> {
    pub const fn new(encoder: SignalEncoder<T>) -> Self {
        Self {
            encoder,
            reset_words: DEFAULT_RESET_WORDS,
        }
    }

    /// Create a driver writing straight to `transport` with an unbounded
    /// ready spin
    pub const fn from_transport(transport: T) -> Self {
        Self::new(SignalEncoder::new(transport))
    }

    /// Number of all-zero words sent ahead of each frame
    ///
    /// Two words are 12.8 us at 2.5 MHz, well short of the nominal 50 us;
    /// raise this for strips that need the full reset time.
    #[must_use]
    pub const fn with_reset_words(mut self, words: usize) -> Self {
        self.reset_words = words;
        self
    }

    pub const fn encoder(&self) -> &SignalEncoder<T> {
        &self.encoder
    }

    pub fn encoder_mut(&mut self) -> &mut SignalEncoder<T> {
        &mut self.encoder
    }

    pub fn release(self) -> SignalEncoder<T> {
        self.encoder
    }

    /// Send the framebuffer to the strip
    pub fn render<const N: usize>(
        &mut self,
        frame: &FrameBuffer<N>,
    ) -> Result<(), TransmitError<T::Error>> {
        self.render_pixels(frame.iter())
    }

    /// Send a frame produced by an iterator, in strip order
    ///
    /// Pixels are pulled from the iterator while interrupts are masked, so
    /// producing each one must be cheap.
    pub fn render_pixels<I>(&mut self, pixels: I) -> Result<(), TransmitError<T::Error>>
    where
        I: IntoIterator<Item = Rgb>,
    {
        critical_section::with(|_| -> Result<(), TransmitError<T::Error>> {
            for _ in 0..self.reset_words {
                self.encoder.transmit_word(0)?;
            }
            for pixel in pixels {
                self.transmit_pixel(pixel)?;
            }
            Ok(())
        })
    }

    fn transmit_pixel(&mut self, pixel: Rgb) -> Result<(), TransmitError<T::Error>> {
        self.encoder.transmit_byte(pixel.g)?;
        self.encoder.transmit_byte(pixel.r)?;
        self.encoder.transmit_byte(pixel.b)
    }
}

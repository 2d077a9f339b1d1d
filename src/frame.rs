//! Pixel framebuffer for a strip of `N` LEDs.
//!
//! Index equals physical position on the strip. Every accessor treats an
//! index outside `0..N` as a caller bug and panics.

use crate::color::{BLACK, Rgb, fade_channel};

/// Fixed-length pixel array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer<const N: usize> {
    pixels: [Rgb; N],
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> FrameBuffer<N> {
    /// Create an all-black framebuffer
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; N],
        }
    }

    /// Number of pixels
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Set the pixel at `index`
    ///
    /// # Panics
    /// If `index >= N`.
    pub fn set_pixel(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.set(index, Rgb { r, g, b });
    }

    /// Set the pixel at `index` from a color
    pub fn set(&mut self, index: usize, color: Rgb) {
        assert!(index < N, "pixel index {} out of range for strip of {}", index, N);
        self.pixels[index] = color;
    }

    /// Read the pixel at `index` as `(r, g, b)`
    pub fn get_pixel(&self, index: usize) -> (u8, u8, u8) {
        let Rgb { r, g, b } = self.get(index);
        (r, g, b)
    }

    /// Read the pixel at `index`
    pub fn get(&self, index: usize) -> Rgb {
        assert!(index < N, "pixel index {} out of range for strip of {}", index, N);
        self.pixels[index]
    }

    /// Set every pixel to the same color
    pub fn set_all(&mut self, r: u8, g: u8, b: u8) {
        self.fill(Rgb { r, g, b });
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(BLACK);
    }

    /// Dim the pixel at `index` by `decay / 256` per channel
    ///
    /// Channels at 10 or below are switched off.
    pub fn fade_to_black(&mut self, index: usize, decay: u8) {
        let pixel = self.get(index);
        self.set(
            index,
            Rgb {
                r: fade_channel(pixel.r, decay),
                g: fade_channel(pixel.g, decay),
                b: fade_channel(pixel.b, decay),
            },
        );
    }

    pub const fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.pixels.iter().copied()
    }
}

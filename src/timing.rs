//! Wire timing of the single-wire NRZ protocol as seen by the SPI bus.
//!
//! The SPI peripheral is used only as a bit clock: every logical protocol bit
//! is three SPI symbol periods long, so the bus must be clocked at exactly
//! three times the protocol bit rate. Peripheral setup itself is left to the
//! board code, these values describe what it has to configure.

use embedded_hal::spi::Mode;

/// SPI symbols per logical protocol bit
pub const SYMBOLS_PER_BIT: u32 = 3;

/// Default SPI clock (400 ns per symbol, 1.2 us per protocol bit)
pub const DEFAULT_SPI_CLOCK_HZ: u32 = 2_500_000;

/// Minimum low time that latches a frame into the strip
pub const RESET_THRESHOLD_US: u32 = 50;

/// All-zero words sent ahead of every frame
pub const DEFAULT_RESET_WORDS: usize = 2;

/// SPI mode the encoder is written for (CPOL = 0, CPHA = 1)
pub const MODE: Mode = embedded_hal::spi::MODE_1;

/// SPI clock needed for the given protocol bit rate
pub const fn spi_clock_hz(bit_rate_hz: u32) -> u32 {
    bit_rate_hz * SYMBOLS_PER_BIT
}

/// Protocol bit rate produced by the given SPI clock
pub const fn bit_rate_hz(spi_clock_hz: u32) -> u32 {
    spi_clock_hz / SYMBOLS_PER_BIT
}

/// Length of one SPI symbol in nanoseconds
pub const fn symbol_period_ns(spi_clock_hz: u32) -> u32 {
    if spi_clock_hz == 0 {
        return 0;
    }
    1_000_000_000 / spi_clock_hz
}

/// Low time produced by `words` all-zero 16-bit words, in nanoseconds
#[allow(clippy::cast_possible_truncation)]
pub const fn reset_low_time_ns(words: usize, spi_clock_hz: u32) -> u32 {
    (words as u32) * 16 * symbol_period_ns(spi_clock_hz)
}

/// Fewest all-zero words whose low time reaches [`RESET_THRESHOLD_US`]
///
/// Pass the result to
/// [`StripDriver::with_reset_words`](crate::StripDriver::with_reset_words)
/// for strips that do not latch on the short default reset.
#[allow(clippy::cast_possible_truncation)]
pub const fn min_reset_words(spi_clock_hz: u32) -> usize {
    let word_ns = reset_low_time_ns(1, spi_clock_hz);
    if word_ns == 0 {
        return DEFAULT_RESET_WORDS;
    }
    (RESET_THRESHOLD_US * 1_000).div_ceil(word_ns) as usize
}

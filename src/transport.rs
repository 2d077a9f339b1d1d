//! Byte transport the signal encoder writes to.
//!
//! Implement [`Transport`] to support a different peripheral. On real
//! hardware [`SpiTransport`] wraps any `embedded-hal` SPI bus; tests provide
//! an in-memory transport instead.

use embedded_hal::spi::SpiBus;

/// Blocking, byte-oriented serial transport with a readiness query
pub trait Transport {
    /// Error reported by the underlying peripheral
    type Error;

    /// Returns `true` when the transport can accept the next byte
    fn is_ready(&mut self) -> bool;

    /// Write one byte, blocking until it is accepted
    fn write(&mut self, byte: u8) -> Result<(), Self::Error>;
}

/// Error returned while transmitting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError<E> {
    /// The transport reported an error
    Transport(E),
    /// The transport did not become ready within the configured spin limit
    NotReady,
}

/// [`Transport`] over an `embedded-hal` SPI bus
///
/// `SpiBus::write` already blocks until the peripheral has room for the
/// byte, so the bus always reports itself as ready.
pub struct SpiTransport<SPI> {
    spi: SPI,
}

impl<SPI: SpiBus<u8>> SpiTransport<SPI> {
    /// Wrap a configured SPI bus
    ///
    /// The bus must already run at [`crate::timing::spi_clock_hz`] of the
    /// target bit rate.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Give the SPI bus back
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI: SpiBus<u8>> Transport for SpiTransport<SPI> {
    type Error = SPI::Error;

    fn is_ready(&mut self) -> bool {
        true
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte])
    }
}

#![allow(dead_code)]

use core::convert::Infallible;

use embedded_hal::{
    delay::DelayNs,
    spi::{ErrorType, SpiBus},
};
use ws2812_spi_fx::{RandomSource, Rgb, Transport, decode_nibble};

/// Bytes of the two all-zero reset words
pub const RESET_BYTES: usize = 4;
/// Wire bytes per pixel: three colour bytes, two words each
pub const PIXEL_BYTES: usize = 12;

/// Records every byte; reports "not ready" for the first `busy_polls` polls
#[derive(Default)]
pub struct RecordingTransport {
    pub bytes: Vec<u8>,
    pub busy_polls: usize,
    pub polls: usize,
}

impl Transport for RecordingTransport {
    type Error = Infallible;

    fn is_ready(&mut self) -> bool {
        self.polls += 1;
        if self.busy_polls > 0 {
            self.busy_polls -= 1;
            return false;
        }
        true
    }

    fn write(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.bytes.push(byte);
        Ok(())
    }
}

/// Never becomes ready
pub struct StalledTransport;

impl Transport for StalledTransport {
    type Error = Infallible;

    fn is_ready(&mut self) -> bool {
        false
    }

    fn write(&mut self, _byte: u8) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Accepts `budget` bytes, then fails every write
pub struct FailingTransport {
    pub budget: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

impl Transport for FailingTransport {
    type Error = BusFault;

    fn is_ready(&mut self) -> bool {
        true
    }

    fn write(&mut self, _byte: u8) -> Result<(), Self::Error> {
        if self.budget == 0 {
            return Err(BusFault);
        }
        self.budget -= 1;
        Ok(())
    }
}

/// In-memory SPI bus keeping everything written to it
#[derive(Default)]
pub struct MemorySpiBus {
    pub written: Vec<u8>,
    pub flushes: usize,
}

impl ErrorType for MemorySpiBus {
    type Error = Infallible;
}

impl SpiBus<u8> for MemorySpiBus {
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        words.fill(0);
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.written.extend_from_slice(words);
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        read.fill(0);
        self.written.extend_from_slice(write);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.written.extend_from_slice(words);
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        Ok(())
    }
}

/// Records every requested delay in milliseconds
#[derive(Default)]
pub struct RecordingDelay {
    pub delays_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

/// Replays a script of raw draws, folded into the requested range
pub struct ScriptedRandom {
    values: Vec<u32>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
            position: 0,
        }
    }

    /// Every draw returns the lower bound of its range
    pub fn zeros() -> Self {
        Self::new(&[0])
    }

    /// Every draw returns `value`, folded into its range
    pub fn constant(value: u32) -> Self {
        Self::new(&[value])
    }
}

impl RandomSource for ScriptedRandom {
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        min + value % (max - min)
    }
}

/// Decode a run of encoded colour bytes (four wire bytes each)
pub fn decode_bytes(wire: &[u8]) -> Vec<u8> {
    wire.chunks_exact(4)
        .map(|chunk| {
            let high = u16::from_be_bytes([chunk[0], chunk[1]]);
            let low = u16::from_be_bytes([chunk[2], chunk[3]]);
            let high = decode_nibble(high).expect("invalid high nibble");
            let low = decode_nibble(low).expect("invalid low nibble");
            (high << 4) | low
        })
        .collect()
}

/// Split a recorded stream into frames of `pixels` pixels and decode them
pub fn decode_frames(wire: &[u8], pixels: usize) -> Vec<Vec<Rgb>> {
    let frame_len = RESET_BYTES + pixels * PIXEL_BYTES;
    assert_eq!(wire.len() % frame_len, 0, "stream is not whole frames");

    wire.chunks_exact(frame_len)
        .map(|frame| {
            assert!(frame[..RESET_BYTES].iter().all(|&b| b == 0), "missing reset");
            decode_bytes(&frame[RESET_BYTES..])
                .chunks_exact(3)
                .map(|grb| Rgb::new(grb[1], grb[0], grb[2]))
                .collect()
        })
        .collect()
}

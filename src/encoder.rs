//! Nibble-to-waveform encoding and the blocking transmit primitive.
//!
//! Each logical bit is three SPI symbols: `110` for a one (≈800 ns high,
//! ≈400 ns low at 2.5 MHz) and `100` for a zero (≈400 ns high, ≈800 ns low).
//! A nibble therefore occupies the low 12 bits of a 16-bit word; the 4 leading
//! zero symbols only stretch the low time of the previous bit, which the strip
//! tolerates.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::transport::{TransmitError, Transport};

/// Symbol group for a logical one
const ONE_SYMBOLS: u16 = 0b110;
/// Symbol group for a logical zero
const ZERO_SYMBOLS: u16 = 0b100;

/// Waveform for every nibble value, most significant bit first
const NIBBLE_PATTERNS: [u16; 16] = [
    0b1001_0010_0100, // 0000
    0b1001_0010_0110, // 0001
    0b1001_0011_0100, // 0010
    0b1001_0011_0110, // 0011
    0b1001_1010_0100, // 0100
    0b1001_1010_0110, // 0101
    0b1001_1011_0100, // 0110
    0b1001_1011_0110, // 0111
    0b1101_0010_0100, // 1000
    0b1101_0010_0110, // 1001
    0b1101_0011_0100, // 1010
    0b1101_0011_0110, // 1011
    0b1101_1010_0100, // 1100
    0b1101_1010_0110, // 1101
    0b1101_1011_0100, // 1110
    0b1101_1011_0110, // 1111
];

/// Encode the low four bits of `value` into its 12-symbol waveform
#[inline]
pub const fn encode_nibble(value: u8) -> u16 {
    NIBBLE_PATTERNS[(value & 0x0F) as usize]
}

/// Decode a 12-symbol waveform back into its nibble
///
/// Returns `None` if any symbol group is neither `110` nor `100`, or if
/// the pattern uses more than 12 bits.
pub const fn decode_nibble(pattern: u16) -> Option<u8> {
    if pattern >> 12 != 0 {
        return None;
    }
    let mut nibble = 0u8;
    let mut group: u32 = 0;
    while group < 4 {
        let shift = 9 - group * 3;
        let bit = match (pattern >> shift) & 0b111 {
            ONE_SYMBOLS => 1,
            ZERO_SYMBOLS => 0,
            _ => return None,
        };
        nibble = (nibble << 1) | bit;
        group += 1;
    }
    Some(nibble)
}

/// Blocking waveform transmitter
///
/// Spins on the transport's ready flag before every byte. By default the
/// spin is unbounded: a transport that never becomes ready hangs the caller.
pub struct SignalEncoder<T> {
    transport: T,
    spin_limit: Option<u32>,
}

impl<T: Transport> SignalEncoder<T> {
    pub const fn new(transport: T) -> Self {
        Self {
            transport,
            spin_limit: None,
        }
    }

    /// Give up after `polls` unsuccessful ready checks per byte
    ///
    /// This departs from the unbounded spin: a stalled transport makes the
    /// transmit return [`TransmitError::NotReady`] instead of hanging.
    #[must_use]
    pub const fn with_spin_limit(mut self, polls: u32) -> Self {
        self.spin_limit = Some(polls);
        self
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn release(self) -> T {
        self.transport
    }

    /// Send a 16-bit word, high byte first
    pub fn transmit_word(&mut self, pattern: u16) -> Result<(), TransmitError<T::Error>> {
        let [high, low] = pattern.to_be_bytes();
        self.transmit_raw(high)?;
        self.transmit_raw(low)
    }

    /// Send one colour byte as two encoded nibbles, high nibble first
    pub fn transmit_byte(&mut self, value: u8) -> Result<(), TransmitError<T::Error>> {
        self.transmit_word(encode_nibble(value >> 4))?;
        self.transmit_word(encode_nibble(value & 0x0F))
    }

    fn transmit_raw(&mut self, byte: u8) -> Result<(), TransmitError<T::Error>> {
        self.wait_ready()?;
        self.transport
            .write(byte)
            .map_err(TransmitError::Transport)
    }

    fn wait_ready(&mut self) -> Result<(), TransmitError<T::Error>> {
        let Some(limit) = self.spin_limit else {
            while !self.transport.is_ready() {
                core::hint::spin_loop();
            }
            return Ok(());
        };

        for _ in 0..=limit {
            if self.transport.is_ready() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        #[cfg(feature = "esp32-log")]
        println!("[SignalEncoder] transport not ready after {} polls", limit);
        Err(TransmitError::NotReady)
    }
}

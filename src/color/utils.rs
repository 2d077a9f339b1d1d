use crate::color::Rgb;

/// Channels at or below this value snap to zero when fading
const FADE_FLOOR: u8 = 10;

/// Scale every channel by `k / 255`
///
/// `k = 255` returns the color unchanged, `k = 0` returns black.
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_linear(color: Rgb, k: u8) -> Rgb {
    const fn channel(v: u8, k: u8) -> u8 {
        ((v as u16 * k as u16) / 255) as u8
    }
    Rgb {
        r: channel(color.r, k),
        g: channel(color.g, k),
        b: channel(color.b, k),
    }
}

/// Multiply every channel by `factor`, saturating at 255
#[allow(clippy::cast_possible_truncation)]
pub fn multiply_saturating(color: Rgb, factor: u32) -> Rgb {
    let channel = |v: u8| u32::from(v).saturating_mul(factor).min(255) as u8;
    Rgb {
        r: channel(color.r),
        g: channel(color.g),
        b: channel(color.b),
    }
}

/// Dim one channel by `decay / 256`
///
/// Values at or below the floor go straight to zero, so repeated fades
/// reach black instead of creeping towards it forever.
#[allow(clippy::cast_possible_truncation)]
pub const fn fade_channel(value: u8, decay: u8) -> u8 {
    if value <= FADE_FLOOR {
        return 0;
    }
    let dimmed = (value as u16 * decay as u16) / 256;
    value - dimmed as u8
}

mod utils;

use smart_leds::RGB8;

pub use utils::{fade_channel, multiply_saturating, scale_linear};

pub type Rgb = RGB8;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };

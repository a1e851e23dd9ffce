//! Pattern system with compile-time known pattern variants
//!
//! All patterns are stored in an enum to avoid heap allocations.
//! Each pattern implements the [`Pattern`] trait and owns only a color
//! cursor (plus animation progress for the rainbow).

mod custom;
mod palette;
mod rainbow;

pub use custom::{CustomPattern, HUE_STEP};
pub use palette::{NamedColor, PalettePattern, WHITE_COLD_COLORS, WHITE_WARM_COLORS};
pub use rainbow::{RAINBOW_MASKS, RainbowPattern};

use crate::color::{Rgb, rgb_from_u32};
use crate::mode::Mode;

/// Brightness divisor span: brightness 0 divides channels by 24
const BRIGHTNESS_SPAN: u16 = 23;

/// Color picked by a pattern together with its cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSelection {
    /// Packed 0xRRGGBB color
    pub rgb: u32,
    /// Pattern cursor (palette index or hue)
    pub index: u32,
}

/// Trait for pattern implementations
pub trait Pattern {
    /// Fill `pixels` for one frame
    ///
    /// # Arguments
    /// * `pixels` - Strip buffer, one entry per LED
    /// * `divisor` - Scaled brightness from [`scaled_brightness`], never 0
    /// * `color` - Base color currently published by the player
    fn render(&mut self, pixels: &mut [Rgb], divisor: u8, color: u32);

    /// Normalize the cursor and return the color it points to
    fn set_color(&mut self) -> ColorSelection;

    /// Return the color under the cursor without touching it
    fn get_color(&self) -> ColorSelection;

    /// Move the cursor to the next color
    fn increment_color(&mut self);
}

/// Map a 0-100 brightness to the channel divisor used by every pattern.
///
/// `1 + (100 - b) * 23 / 100`: 100 gives 1 (full output), 0 gives 24.
/// Values above 100 are treated as 100.
pub const fn scaled_brightness(brightness: u8) -> u8 {
    let brightness = if brightness > 100 { 100 } else { brightness as u16 };
    (1 + (100 - brightness) * BRIGHTNESS_SPAN / 100) as u8
}

/// Fill every pixel with `color` divided by `divisor`
pub(crate) fn fill_solid(pixels: &mut [Rgb], divisor: u8, color: u32) {
    let divisor = divisor.max(1);
    let base = rgb_from_u32(color);
    let scaled = Rgb {
        r: base.r / divisor,
        g: base.g / divisor,
        b: base.b / divisor,
    };
    pixels.fill(scaled);
}

/// Pattern slot - enum containing all possible patterns
#[derive(Debug, Clone)]
pub enum PatternSlot {
    WhiteCold(PalettePattern),
    WhiteWarm(PalettePattern),
    Custom(CustomPattern),
    Rainbow(RainbowPattern),
    /// Reserved mode without a renderer; frames are left untouched
    Unishine,
}

impl PatternSlot {
    /// Build the pattern of `mode` resuming at `cursor`
    pub fn new(mode: Mode, cursor: u32) -> Self {
        match mode {
            Mode::WhiteCold => Self::WhiteCold(PalettePattern::new(&WHITE_COLD_COLORS, cursor)),
            Mode::WhiteWarm => Self::WhiteWarm(PalettePattern::new(&WHITE_WARM_COLORS, cursor)),
            Mode::Custom => Self::Custom(CustomPattern::new(cursor)),
            Mode::Rainbow => Self::Rainbow(RainbowPattern::new(cursor)),
            Mode::Unishine => Self::Unishine,
        }
    }

    /// Mode this pattern belongs to
    pub fn mode(&self) -> Mode {
        match self {
            Self::WhiteCold(_) => Mode::WhiteCold,
            Self::WhiteWarm(_) => Mode::WhiteWarm,
            Self::Custom(_) => Mode::Custom,
            Self::Rainbow(_) => Mode::Rainbow,
            Self::Unishine => Mode::Unishine,
        }
    }

    /// Resolve the color to publish for a color request.
    ///
    /// Real patterns ignore `requested` and answer with their own cursor;
    /// the placeholder echoes the request with cursor 0.
    pub fn resolve_color(&mut self, requested: u32) -> ColorSelection {
        match self {
            Self::WhiteCold(pattern) | Self::WhiteWarm(pattern) => pattern.set_color(),
            Self::Custom(pattern) => pattern.set_color(),
            Self::Rainbow(pattern) => pattern.set_color(),
            Self::Unishine => ColorSelection {
                rgb: requested,
                index: 0,
            },
        }
    }

    /// Current selection, if the pattern has one
    pub fn color(&self) -> Option<ColorSelection> {
        match self {
            Self::WhiteCold(pattern) | Self::WhiteWarm(pattern) => Some(pattern.get_color()),
            Self::Custom(pattern) => Some(pattern.get_color()),
            Self::Rainbow(pattern) => Some(pattern.get_color()),
            Self::Unishine => None,
        }
    }

    pub fn increment_color(&mut self) {
        match self {
            Self::WhiteCold(pattern) | Self::WhiteWarm(pattern) => pattern.increment_color(),
            Self::Custom(pattern) => pattern.increment_color(),
            Self::Rainbow(pattern) => pattern.increment_color(),
            Self::Unishine => {}
        }
    }

    /// Render the current pattern
    pub fn render(&mut self, pixels: &mut [Rgb], divisor: u8, color: u32) {
        match self {
            Self::WhiteCold(pattern) | Self::WhiteWarm(pattern) => {
                pattern.render(pixels, divisor, color);
            }
            Self::Custom(pattern) => pattern.render(pixels, divisor, color),
            Self::Rainbow(pattern) => pattern.render(pixels, divisor, color),
            Self::Unishine => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_brightness_bounds() {
        assert_eq!(scaled_brightness(100), 1);
        assert_eq!(scaled_brightness(50), 12);
        assert_eq!(scaled_brightness(0), 24);
    }

    #[test]
    fn scaled_brightness_never_zero() {
        for brightness in 0..=u8::MAX {
            let divisor = scaled_brightness(brightness);
            assert!(divisor >= 1);
            assert!(divisor <= 24);
        }
        assert_eq!(scaled_brightness(200), scaled_brightness(100));
    }

    #[test]
    fn slot_follows_mode() {
        for mode in Mode::ALL {
            assert_eq!(PatternSlot::new(mode, 0).mode(), mode);
        }
    }

    #[test]
    fn placeholder_leaves_frame_untouched() {
        let marker = Rgb { r: 1, g: 2, b: 3 };
        let mut pixels = [marker; 4];
        let mut slot = PatternSlot::new(Mode::Unishine, 0);

        slot.render(&mut pixels, 1, 0xFFFFFF);
        slot.increment_color();

        assert_eq!(pixels, [marker; 4]);
        assert_eq!(slot.color(), None);
        assert_eq!(
            slot.resolve_color(0x123456),
            ColorSelection {
                rgb: 0x123456,
                index: 0
            }
        );
    }

    #[test]
    fn fill_solid_divides_channels() {
        let mut pixels = [Rgb::default(); 3];
        fill_solid(&mut pixels, 12, 0xF0_60_0C);
        assert_eq!(pixels, [Rgb { r: 20, g: 8, b: 1 }; 3]);
    }
}

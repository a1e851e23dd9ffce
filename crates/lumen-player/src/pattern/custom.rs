use super::{ColorSelection, Pattern, fill_solid};
use crate::color::{Rgb, hue_to_rgb};

/// Hue advance of one `increment_color`
pub const HUE_STEP: u16 = 750;

/// Solid fill with a freely selectable hue
#[derive(Debug, Clone)]
pub struct CustomPattern {
    hue: u16,
}

impl CustomPattern {
    /// Cursors that do not fit a hue restart from red
    pub fn new(cursor: u32) -> Self {
        Self {
            hue: u16::try_from(cursor).unwrap_or(0),
        }
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }
}

impl Pattern for CustomPattern {
    fn render(&mut self, pixels: &mut [Rgb], divisor: u8, color: u32) {
        fill_solid(pixels, divisor, color);
    }

    fn set_color(&mut self) -> ColorSelection {
        if self.hue == u16::MAX {
            self.hue = 0;
        }
        self.get_color()
    }

    fn get_color(&self) -> ColorSelection {
        ColorSelection {
            rgb: hue_to_rgb(self.hue),
            index: u32::from(self.hue),
        }
    }

    fn increment_color(&mut self) {
        self.hue = self.hue.wrapping_add(HUE_STEP);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_steps_from_red() {
        let mut pattern = CustomPattern::new(0);
        assert_eq!(pattern.set_color().rgb, 0xFF0000);

        for _ in 0..3 {
            pattern.increment_color();
        }
        let selection = pattern.set_color();
        assert_eq!(selection.index, 2250);
        assert_eq!(selection.rgb, 0xFF3D00);
    }

    #[test]
    fn hue_wraps() {
        let mut pattern = CustomPattern::new(65_000);
        pattern.increment_color();
        assert_eq!(pattern.hue(), 214);

        let mut pattern = CustomPattern::new(u32::from(u16::MAX));
        assert_eq!(pattern.set_color().index, 0);
    }

    #[test]
    fn oversized_cursor_restarts() {
        assert_eq!(CustomPattern::new(70_000).hue(), 0);
    }
}

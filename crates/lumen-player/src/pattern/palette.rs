use super::{ColorSelection, Pattern, fill_solid};
use crate::color::Rgb;

/// Palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: u32,
}

impl NamedColor {
    pub const fn new(name: &'static str, rgb: u32) -> Self {
        Self { name, rgb }
    }
}

pub const WHITE_COLD_COLORS: [NamedColor; 6] = [
    NamedColor::new("Cold white", 0xF5F9FF),
    NamedColor::new("Light blue", 0xEAF3FF),
    NamedColor::new("Lightning silver", 0xE0E5EE),
    NamedColor::new("Arctic white", 0xEDF8FF),
    NamedColor::new("Glacier grey", 0xD8DEE9),
    NamedColor::new("Alabaster blue", 0xD0E3F0),
];

pub const WHITE_WARM_COLORS: [NamedColor; 8] = [
    NamedColor::new("White gold", 0xFF5A0A),
    NamedColor::new("Pale beige", 0xCD5A0A),
    NamedColor::new("Gold", 0xFF4103),
    NamedColor::new("Cream", 0xFF2D03),
    NamedColor::new("Champagne", 0xCD2D03),
    NamedColor::new("Yellow", 0xFF4100),
    NamedColor::new("Brass", 0xFF2300),
    NamedColor::new("Orange", 0xFF0F00),
];

/// Solid fill pattern cycling through a fixed palette
#[derive(Debug, Clone)]
pub struct PalettePattern {
    colors: &'static [NamedColor],
    cursor: u32,
}

impl PalettePattern {
    pub const fn new(colors: &'static [NamedColor], cursor: u32) -> Self {
        Self { colors, cursor }
    }

    /// Name of the entry under the cursor, if the cursor is in range
    pub fn color_name(&self) -> Option<&'static str> {
        self.entry().map(|entry| entry.name)
    }

    fn entry(&self) -> Option<&NamedColor> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|index| self.colors.get(index))
    }
}

impl Pattern for PalettePattern {
    fn render(&mut self, pixels: &mut [Rgb], divisor: u8, color: u32) {
        fill_solid(pixels, divisor, color);
    }

    fn set_color(&mut self) -> ColorSelection {
        if self.entry().is_none() {
            self.cursor = 0;
        }
        self.get_color()
    }

    fn get_color(&self) -> ColorSelection {
        ColorSelection {
            rgb: self.entry().map_or(0, |entry| entry.rgb),
            index: self.cursor,
        }
    }

    fn increment_color(&mut self) {
        self.cursor = self.cursor.wrapping_add(1);
    }
}

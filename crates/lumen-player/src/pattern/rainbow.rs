use super::palette::NamedColor;
use super::{ColorSelection, Pattern};
use crate::color::{Rgb, rgb_from_u32};

const CHANNEL_MAX: u32 = 255;

/// Channel masks: a zero channel is removed from the whole sweep
pub const RAINBOW_MASKS: [NamedColor; 4] = [
    NamedColor::new("RGB enabled", 0xFFFFFF),
    NamedColor::new("Red disabled", 0x00FFFF),
    NamedColor::new("Green disabled", 0xFF00FF),
    NamedColor::new("Blue disabled", 0xFFFF00),
];

/// Rotating three segment sweep (blue to red, red to green, green to blue)
#[derive(Debug, Clone)]
pub struct RainbowPattern {
    cursor: u32,
    /// Rotation offset, advanced once per frame
    frame: usize,
}

impl RainbowPattern {
    pub const fn new(cursor: u32) -> Self {
        Self { cursor, frame: 0 }
    }

    fn mask(&self) -> Option<&NamedColor> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|index| RAINBOW_MASKS.get(index))
    }
}

/// Ramp value of step `k` in a segment of `segment` pixels
fn ramp(k: u32, segment: u32) -> u32 {
    (CHANNEL_MAX * k / segment).min(CHANNEL_MAX)
}

impl Pattern for RainbowPattern {
    fn render(&mut self, pixels: &mut [Rgb], divisor: u8, color: u32) {
        let len = pixels.len();
        if len == 0 {
            return;
        }

        let divisor = u32::from(divisor.max(1));
        let mask = rgb_from_u32(color);
        let total = u32::try_from(len).unwrap_or(u32::MAX);
        let segment = (total / 3).max(1);
        let first_end = total / 3;
        let second_end = total * 2 / 3;

        for i in 0..len {
            let position = u32::try_from(i).unwrap_or(u32::MAX);
            let (r, g, b) = if position < first_end {
                let k = ramp(position, segment);
                (k, 0, CHANNEL_MAX - k)
            } else if position < second_end {
                let l = ramp(position - first_end, segment);
                (CHANNEL_MAX - l, l, 0)
            } else {
                let m = ramp(position - second_end, segment);
                (0, CHANNEL_MAX - m, m)
            };

            let r = if mask.r == 0 { 0 } else { r };
            let g = if mask.g == 0 { 0 } else { g };
            let b = if mask.b == 0 { 0 } else { b };

            #[allow(clippy::cast_possible_truncation)]
            let pixel = Rgb {
                r: (r / divisor) as u8,
                g: (g / divisor) as u8,
                b: (b / divisor) as u8,
            };
            pixels[(i + self.frame) % len] = pixel;
        }

        self.frame = (self.frame + 1) % len;
    }

    fn set_color(&mut self) -> ColorSelection {
        if self.mask().is_none() {
            self.cursor = 0;
        }
        self.get_color()
    }

    fn get_color(&self) -> ColorSelection {
        ColorSelection {
            rgb: self.mask().map_or(0, |mask| mask.rgb),
            index: self.cursor,
        }
    }

    fn increment_color(&mut self) {
        self.cursor = self.cursor.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_covers_three_segments() {
        let mut pattern = RainbowPattern::new(0);
        let mut pixels = [Rgb::default(); 6];
        pattern.render(&mut pixels, 1, 0xFFFFFF);

        assert_eq!(pixels[0], Rgb { r: 0, g: 0, b: 255 });
        assert_eq!(pixels[2], Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(pixels[4], Rgb { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn frame_rotates() {
        let mut pattern = RainbowPattern::new(0);
        let mut first = [Rgb::default(); 6];
        let mut second = [Rgb::default(); 6];
        pattern.render(&mut first, 1, 0xFFFFFF);
        pattern.render(&mut second, 1, 0xFFFFFF);

        for i in 0..6 {
            assert_eq!(second[(i + 1) % 6], first[i]);
        }
    }

    #[test]
    fn masks_zero_channels() {
        let cases: [(u32, fn(&Rgb) -> u8); 3] = [
            (0x00FFFF, |p| p.r),
            (0xFF00FF, |p| p.g),
            (0xFFFF00, |p| p.b),
        ];
        for (mask, check) in cases {
            let mut pattern = RainbowPattern::new(0);
            let mut pixels = [Rgb::default(); 14];
            for _ in 0..3 {
                pattern.render(&mut pixels, 1, mask);
                assert!(pixels.iter().all(|p| check(p) == 0));
            }
        }
    }

    #[test]
    fn tiny_strips() {
        let mut pattern = RainbowPattern::new(0);
        let mut one = [Rgb::default(); 1];
        let mut two = [Rgb::default(); 2];
        pattern.render(&mut one, 1, 0xFFFFFF);
        pattern.render(&mut two, 1, 0xFFFFFF);
        pattern.render(&mut [], 1, 0xFFFFFF);
        assert_eq!(one[0], Rgb { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn mask_cursor_wraps() {
        let mut pattern = RainbowPattern::new(3);
        assert_eq!(pattern.set_color().rgb, 0xFFFF00);
        pattern.increment_color();
        assert_eq!(pattern.set_color().index, 0);
    }
}

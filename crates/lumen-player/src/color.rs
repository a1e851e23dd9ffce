use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Largest representable packed color
pub const COLOR_MAX: u32 = 0x00FF_FFFF;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Convert a 16-bit hue into a fully saturated, full value RGB color.
///
/// The hue circle is split in six 60 degree sectors. All math is integer
/// percent math (hue in hundredths of a degree), so channel values follow
/// the coarse steps of that precision rather than a float conversion.
pub fn hue_to_rgb(hue: u16) -> u32 {
    // Degrees x100
    let hf = u32::from(hue) * 36_000 / 65_535;

    let saturation = 100;
    let value = 100;
    let chroma = value * saturation / 100;

    let sector_pos = hf % 6_000;
    let ramp = (sector_pos * 2 / 100).abs_diff(100);
    let x = chroma * (100 - ramp) / 100;
    let m = value - chroma;

    let (rf, gf, bf) = match hf {
        0..6_000 => (chroma, x, 0),
        6_000..12_000 => (x, chroma, 0),
        12_000..18_000 => (0, chroma, x),
        18_000..24_000 => (0, x, chroma),
        24_000..30_000 => (x, 0, chroma),
        _ => (chroma, 0, x),
    };

    let r = (rf + m) * 255 / 100;
    let g = (gf + m) * 255 / 100;
    let b = (bf + m) * 255 / 100;

    (r << 16) | (g << 8) | b
}

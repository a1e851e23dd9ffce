//! Display modes of the player

/// Number of known modes, placeholder included
pub const MODE_COUNT: usize = 5;

/// Display mode
///
/// `Unishine` is a reserved placeholder: it has no renderer yet and the
/// controller never selects it (raw values at or above it clamp to the
/// first mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Mode {
    #[default]
    WhiteCold = 0,
    WhiteWarm = 1,
    Custom = 2,
    Rainbow = 3,
    Unishine = 4,
}

impl Mode {
    /// All modes in id order
    pub const ALL: [Mode; MODE_COUNT] = [
        Mode::WhiteCold,
        Mode::WhiteWarm,
        Mode::Custom,
        Mode::Rainbow,
        Mode::Unishine,
    ];

    /// Exact mapping from a raw id
    pub const fn from_raw(value: u32) -> Option<Self> {
        Some(match value {
            0 => Self::WhiteCold,
            1 => Self::WhiteWarm,
            2 => Self::Custom,
            3 => Self::Rainbow,
            4 => Self::Unishine,
            _ => return None,
        })
    }

    /// Clamping mapping used by the controller.
    ///
    /// Anything at or above the placeholder falls back to [`Mode::WhiteCold`].
    pub const fn clamped(value: u32) -> Self {
        match Self::from_raw(value) {
            Some(Self::Unishine) | None => Self::WhiteCold,
            Some(mode) => mode,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Slot of this mode in per-mode arrays
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Next mode in the selection cycle
    pub const fn next(self) -> Self {
        Self::clamped(self as u32 + 1)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WhiteCold => "white_cold",
            Self::WhiteWarm => "white_warm",
            Self::Custom => "custom",
            Self::Rainbow => "rainbow",
            Self::Unishine => "unishine",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_out_of_range() {
        for raw in [4, 5, 6, 255, u32::MAX] {
            assert_eq!(Mode::clamped(raw), Mode::WhiteCold);
        }
    }

    #[test]
    fn clamp_keeps_valid_modes() {
        assert_eq!(Mode::clamped(1), Mode::WhiteWarm);
        assert_eq!(Mode::clamped(3), Mode::Rainbow);
    }

    #[test]
    fn next_cycles_over_selectable_modes() {
        let mut mode = Mode::WhiteCold;
        let mut seen = [false; MODE_COUNT];
        for _ in 0..8 {
            seen[mode.index()] = true;
            mode = mode.next();
        }
        assert_eq!(seen, [true, true, true, true, false]);
        assert_eq!(Mode::Rainbow.next(), Mode::WhiteCold);
    }

    #[test]
    fn from_raw_knows_placeholder() {
        assert_eq!(Mode::from_raw(4), Some(Mode::Unishine));
        assert_eq!(Mode::from_raw(5), None);
    }
}

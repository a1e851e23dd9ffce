#![allow(clippy::unreadable_literal)]

use embassy_time::Duration;

pub struct PlayerConfig {
    /// Period of the render loop
    pub render_period: Duration,
    /// Brightness used when no valid context is stored
    pub default_brightness: u8,
    /// Brightness step of a touch "next brightness" event
    pub touch_brightness_step: u8,
    /// Color step reported by a touch "next color" event
    pub touch_color_step: u32,
}

pub struct StorageConfig {
    /// Delay between the last state change and the context write
    pub write_debounce: Duration,
    /// Flash erase unit; one record must fit in it
    pub erase_unit: u32,
}

pub struct StripConfig {
    /// Strip length used when the factory record is missing
    pub default_led_length: u32,
    /// Upper bound accepted when provisioning the strip length
    pub max_led_length: u32,
}

pub const PLAYER: PlayerConfig = PlayerConfig {
    render_period: Duration::from_millis(50),
    default_brightness: 50,
    touch_brightness_step: 10,
    touch_color_step: 255,
};

pub const STORAGE: StorageConfig = StorageConfig {
    write_debounce: Duration::from_secs(10),
    erase_unit: 4096,
};

pub const STRIP: StripConfig = StripConfig {
    default_led_length: 14,
    max_led_length: 10_000,
};

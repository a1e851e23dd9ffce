#![allow(clippy::unreadable_literal)]

use embassy_time::Duration;

/// Base address of the `player_ctx` partition (defined in partitions.csv).
pub const CONTEXT_PARTITION_OFFSET: u32 = 0x31_0000;
/// Base address of the `factory_id` partition (defined in partitions.csv).
pub const FACTORY_PARTITION_OFFSET: u32 = 0x31_1000;

/// Size of the RMT pixel buffer; longer strips are truncated.
///
/// A frame is filled under the player's critical section, so interrupts stay
/// masked for the whole fill. Raising this lengthens that window.
pub const MAX_LED_COUNT: usize = 256;

/// Longest provisioning console line
pub const CONSOLE_LINE_CAPACITY: usize = 64;

pub(crate) struct ButtonConfig {
    /// Ignore edges for this long after a press
    pub debounce: Duration,
    /// Hold time of the power pad that asks for power-off
    pub long_press: Duration,
}

pub(crate) const BUTTON: ButtonConfig = ButtonConfig {
    debounce: Duration::from_millis(50),
    long_press: Duration::from_secs(2),
};

#[macro_export]
macro_rules! led_gpio {
    ($p:expr) => {
        $p.GPIO25
    };
}

/// Touch pads: (mode, color, brightness, power)
#[macro_export]
macro_rules! touch_gpios {
    ($p:expr) => {
        ($p.GPIO32, $p.GPIO33, $p.GPIO27, $p.GPIO14)
    };
}

/// Provisioning console receive pin (UART0 RX)
#[macro_export]
macro_rules! console_rx_gpio {
    ($p:expr) => {
        $p.GPIO3
    };
}

/// Blinks while the factory firmware runs
#[macro_export]
macro_rules! status_led_gpio {
    ($p:expr) => {
        $p.GPIO2
    };
}

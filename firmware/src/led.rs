use static_cell::make_static;

use esp_hal::xtensa_lx::interrupt;
use esp_hal::{gpio::interconnect::PeripheralOutput, peripherals::RMT, rmt::Rmt, time::Rate};
use esp_hal_smartled::{SmartLedsAdapter, buffer_size, smart_led_buffer};
use smart_leds::SmartLedsWrite;

use lumen_player::{LedDriver, LedError, Rgb};

use crate::config::MAX_LED_COUNT;

/// WS2812 strip driven by the RMT peripheral
///
/// The RMT generates the precise timing signals required by WS2812B LEDs.
pub struct EspLedDriver<'a> {
    adapter: SmartLedsAdapter<'a, { buffer_size(MAX_LED_COUNT) }>,
}

impl<'a> EspLedDriver<'a> {
    /// Create a new ESP LED driver
    ///
    /// # Arguments
    /// * `rmt` - RMT peripheral
    /// * `pin` - GPIO pin connected to the LED data line
    pub fn new<O>(rmt: RMT<'a>, pin: O) -> Option<Self>
    where
        O: PeripheralOutput<'a>,
    {
        let rmt = match Rmt::new(rmt, Rate::from_mhz(80)) {
            Ok(rmt) => rmt,
            Err(err) => {
                log::error!("led: rmt init failed: {:?}", err);
                return None;
            }
        };

        let rmt_buffer = make_static!(smart_led_buffer!(MAX_LED_COUNT));
        let adapter = SmartLedsAdapter::new(rmt.channel0, pin, rmt_buffer);

        Some(Self { adapter })
    }
}

impl LedDriver for EspLedDriver<'static> {
    fn write(&mut self, pixels: &[Rgb]) -> Result<(), LedError> {
        // The RMT transfer must not be interrupted mid-frame
        interrupt::free(|| self.adapter.write(pixels.iter().copied()))
            .map_err(|_| LedError::WriteFailed)
    }
}

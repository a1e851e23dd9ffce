use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use esp_hal::Async;
use esp_hal::gpio::Input;
use esp_hal::uart::UartRx;
use esp_println::println;
use esp_storage::FlashStorage;
use heapless::Vec;

use lumen_player::config::STORAGE;
use lumen_player::{
    ContextStore, FactoryStore, InputAction, InputEvent, Player, RenderLoop, handle_event,
    run_line, run_saver,
};

use crate::config::{BUTTON, CONSOLE_LINE_CAPACITY, MAX_LED_COUNT};
use crate::led::EspLedDriver;

pub type LightDriver = EspLedDriver<'static>;
pub type AppContextStore = ContextStore<FlashStorage<'static>>;
pub type AppFactoryStore = FactoryStore<FlashStorage<'static>>;

/// Render the player onto the strip every tick
#[embassy_executor::task]
pub async fn render_task(player: &'static Player, driver: LightDriver, led_count: usize) {
    let mut render: RenderLoop<'static, LightDriver, MAX_LED_COUNT> =
        RenderLoop::new(player, driver, led_count);
    render.run().await
}

/// Persist the player context after the debounce window
#[embassy_executor::task]
pub async fn saver_task(player: &'static Player, mut store: AppContextStore) {
    run_saver(player, &mut store, STORAGE.write_debounce).await
}

/// Short press pad bound to one player action
#[embassy_executor::task(pool_size = 3)]
pub async fn touch_task(mut pad: Input<'static>, event: InputEvent, player: &'static Player) {
    loop {
        pad.wait_for_falling_edge().await;
        handle_event(player, event);
        Timer::after(BUTTON.debounce).await;
        pad.wait_for_high().await;
    }
}

/// Power pad: only a long press counts
#[embassy_executor::task]
pub async fn power_task(mut pad: Input<'static>, player: &'static Player) {
    loop {
        pad.wait_for_falling_edge().await;
        match select(pad.wait_for_rising_edge(), Timer::after(BUTTON.long_press)).await {
            Either::First(()) => {}
            Either::Second(()) => {
                if handle_event(player, InputEvent::PowerOff) == InputAction::PowerOff {
                    // No low power support on this board yet
                    log::warn!("power: power-off unsupported, ignoring");
                }
                pad.wait_for_high().await;
            }
        }
        Timer::after(BUTTON.debounce).await;
    }
}

/// Line based provisioning console on the UART
#[embassy_executor::task]
pub async fn console_task(mut rx: UartRx<'static, Async>, mut store: AppFactoryStore) {
    let mut line: Vec<u8, CONSOLE_LINE_CAPACITY> = Vec::new();
    let mut chunk = [0u8; 16];

    loop {
        let count = match rx.read_async(&mut chunk).await {
            Ok(count) => count,
            Err(err) => {
                log::warn!("console: read failed: {:?}", err);
                line.clear();
                continue;
            }
        };

        for &byte in &chunk[..count] {
            match byte {
                b'\r' | b'\n' => {
                    if line.is_empty() {
                        continue;
                    }
                    match core::str::from_utf8(&line) {
                        Ok(text) => println!("{}", run_line(&mut store, text)),
                        Err(_) => println!("error: not utf-8"),
                    }
                    line.clear();
                }
                _ => {
                    if line.push(byte).is_err() {
                        println!("error: line longer than {} bytes", CONSOLE_LINE_CAPACITY);
                        line.clear();
                    }
                }
            }
        }
    }
}

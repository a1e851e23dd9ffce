#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;

use esp_backtrace as _;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_storage::FlashStorage;

use lumen_firmware::config::{CONTEXT_PARTITION_OFFSET, FACTORY_PARTITION_OFFSET, MAX_LED_COUNT};
use lumen_firmware::led::EspLedDriver;
use lumen_firmware::tasks::{power_task, render_task, saver_task, touch_task};
use lumen_firmware::{led_gpio, mk_static, touch_gpios};
use lumen_player::{ContextStore, FactoryIdentity, FactoryStore, InputEvent, PersistedContext, Player};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Strip identity first, the context store takes the flash afterwards
    let mut flash = FlashStorage::new(peripherals.FLASH);
    let identity = match FactoryStore::open(&mut flash, FACTORY_PARTITION_OFFSET) {
        Ok(mut factory) => factory.load_or_default(),
        Err(err) => {
            log::error!("boot: factory region unusable: {:?}", err);
            FactoryIdentity::default()
        }
    };
    // `rgbw` is reserved: the strip is always driven as RGB for now
    log::info!(
        "boot: {} LEDs (rgbw: {})",
        identity.led_length,
        identity.rgbw
    );

    let (context, store) = match ContextStore::open(flash, CONTEXT_PARTITION_OFFSET) {
        Ok(mut store) => (store.load_or_default(), Some(store)),
        Err(err) => {
            log::error!("boot: context region unusable: {:?}", err);
            (PersistedContext::default(), None)
        }
    };
    let player: &'static Player = mk_static!(Player, Player::new(context));

    // Persistence
    if let Some(store) = store {
        spawner.spawn(saver_task(player, store)).ok();
    }

    // Rendering
    let led_count = usize::try_from(identity.led_length).unwrap_or(MAX_LED_COUNT);
    match EspLedDriver::new(peripherals.RMT, led_gpio!(peripherals)) {
        Some(driver) => {
            spawner.spawn(render_task(player, driver, led_count)).ok();
        }
        None => log::error!("boot: strip unavailable, rendering disabled"),
    }

    // Touch pads
    let (mode_pin, color_pin, brightness_pin, power_pin) = touch_gpios!(peripherals);
    let pad_config = InputConfig::default().with_pull(Pull::Up);
    spawner
        .spawn(touch_task(Input::new(mode_pin, pad_config), InputEvent::NextMode, player))
        .ok();
    spawner
        .spawn(touch_task(Input::new(color_pin, pad_config), InputEvent::NextColor, player))
        .ok();
    spawner
        .spawn(touch_task(
            Input::new(brightness_pin, pad_config),
            InputEvent::NextBrightness,
            player,
        ))
        .ok();
    spawner
        .spawn(power_task(Input::new(power_pin, pad_config), player))
        .ok();

    loop {
        embassy_time::Timer::after(Duration::from_secs(5)).await;
    }
}

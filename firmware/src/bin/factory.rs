//! Factory Firmware
//!
//! Provisioning build for initial device setup:
//! - Opens the factory identity record
//! - Accepts `factory led_number ...` and `factory rgbw ...` commands on UART0
//! - Blinks the status LED while waiting

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::Duration;
use esp_backtrace as _;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::uart::{Config as UartConfig, UartRx};
use esp_hal::{clock::CpuClock, timer::timg::TimerGroup};
use esp_println::println;
use esp_storage::FlashStorage;

use lumen_firmware::config::FACTORY_PARTITION_OFFSET;
use lumen_firmware::tasks::console_task;
use lumen_firmware::{console_rx_gpio, status_led_gpio};
use lumen_player::FactoryStore;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();

    println!("=================================");
    println!("  Lumen Factory Firmware");
    println!("=================================");

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Start RTOS
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let flash = FlashStorage::new(peripherals.FLASH);
    let store = match FactoryStore::open(flash, FACTORY_PARTITION_OFFSET) {
        Ok(mut store) => {
            match store.read() {
                Ok(identity) => println!(
                    "Current: {} LEDs, rgbw {}",
                    identity.led_length, identity.rgbw
                ),
                Err(err) => println!("No factory record yet ({:?})", err),
            }
            Some(store)
        }
        Err(err) => {
            log::error!("factory: region unusable: {:?}", err);
            None
        }
    };

    let console = UartRx::new(peripherals.UART0, UartConfig::default())
        .map(|rx| rx.with_rx(console_rx_gpio!(peripherals)).into_async());

    match (store, console) {
        (Some(store), Ok(rx)) => {
            spawner.spawn(console_task(rx, store)).ok();
            println!("Factory firmware ready!");
            println!("  factory led_number get | set <count>");
            println!("  factory rgbw get | on | off");
        }
        (_, Err(err)) => log::error!("factory: console unavailable: {:?}", err),
        (None, Ok(_)) => {}
    }

    let mut pin = Output::new(
        status_led_gpio!(peripherals),
        Level::High,
        OutputConfig::default(),
    );
    loop {
        pin.set_high();
        embassy_time::Timer::after(Duration::from_millis(500)).await;
        pin.set_low();
        embassy_time::Timer::after(Duration::from_millis(500)).await;
    }
}

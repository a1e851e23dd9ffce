//! Factory console commands on the in-memory flash.

use lumen_player::{FactoryIdentity, FactoryStore, run_line};
use tests::MemFlash;

const FACTORY_OFFSET: u32 = 0x2000;

fn store() -> FactoryStore<MemFlash> {
    FactoryStore::open(MemFlash::new(4), FACTORY_OFFSET).unwrap()
}

#[test]
fn get_on_blank_device_reports_read_failure() {
    let mut store = store();
    assert_eq!(
        run_line(&mut store, "factory led_number get").as_str(),
        "error: failed to read memory (NotFound)"
    );
}

#[test]
fn set_led_number_then_get() {
    let mut store = store();
    assert_eq!(run_line(&mut store, "factory led_number set 120").as_str(), "OK:120");
    assert_eq!(
        run_line(&mut store, "factory led_number get").as_str(),
        "LED number: 120"
    );
    assert_eq!(
        store.read(),
        Ok(FactoryIdentity {
            led_length: 120,
            rgbw: false,
        })
    );
}

#[test]
fn led_number_cap() {
    let mut store = store();
    assert_eq!(run_line(&mut store, "factory led_number set 10000").as_str(), "OK:10000");
    assert_eq!(
        run_line(&mut store, "factory led_number set 10001").as_str(),
        "error: 10001 LEDs is above the supported maximum"
    );
    assert_eq!(store.read().unwrap().led_length, 10_000);
}

#[test]
fn rgbw_toggle_keeps_led_number() {
    let mut store = store();
    run_line(&mut store, "factory led_number set 60");

    assert_eq!(run_line(&mut store, "factory rgbw on").as_str(), "OK:1");
    assert_eq!(run_line(&mut store, "factory rgbw get").as_str(), "RGBW option: on");
    assert_eq!(run_line(&mut store, "factory rgbw off").as_str(), "OK:0");
    assert_eq!(run_line(&mut store, "factory rgbw get").as_str(), "RGBW option: off");
    assert_eq!(store.read().unwrap().led_length, 60);
}

#[test]
fn write_failure_is_reported() {
    let mut flash = MemFlash::new(4);
    flash.fail_writes = true;
    let mut store = FactoryStore::open(flash, FACTORY_OFFSET).unwrap();
    assert_eq!(
        run_line(&mut store, "factory rgbw on").as_str(),
        "error: failed to write memory (DriverError)"
    );
}

#[test]
fn bad_lines_leave_the_record_alone() {
    let mut store = store();
    run_line(&mut store, "factory led_number set 30");
    let erases = store.flash_mut().erases;

    assert_eq!(
        run_line(&mut store, "factory led_number set abc").as_str(),
        "error: expected a decimal u32"
    );
    assert_eq!(
        run_line(&mut store, "factory rgbw").as_str(),
        "error: missing argument"
    );
    assert_eq!(run_line(&mut store, "help").as_str(), "error: unknown command");
    assert_eq!(store.flash_mut().erases, erases);
}

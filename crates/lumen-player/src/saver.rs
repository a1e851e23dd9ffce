//! Debounced context write-back
//!
//! Save requests are coalesced: every new request restarts the delay, and
//! the context is written once the player has been quiet for the whole
//! delay.

use embassy_futures::select::{Either, select};
use embassy_time::{Duration, Timer};
use embedded_storage::nor_flash::NorFlash;

use crate::context::ContextStore;
use crate::player::Player;

/// Wait for save requests and persist the player context after `delay`
/// of inactivity. Never returns.
pub async fn run_saver<F: NorFlash>(
    player: &Player,
    store: &mut ContextStore<F>,
    delay: Duration,
) -> ! {
    log::info!("saver: starting, debounce {} ms", delay.as_millis());
    loop {
        player.wait_save_request().await;

        loop {
            match select(player.wait_save_request(), Timer::after(delay)).await {
                Either::First(()) => {}
                Either::Second(()) => break,
            }
        }

        // Snapshot under the player lock, flash I/O outside it
        let context = player.context();
        match store.write(&context) {
            Ok(()) => log::info!("saver: context saved"),
            Err(err) => log::error!("saver: failed to save context: {:?}", err),
        }
    }
}

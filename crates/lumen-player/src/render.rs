//! Periodic render loop
//!
//! Owns the pixel buffer, asks the [`Player`] for a frame on every tick
//! and pushes it to the [`LedDriver`].

use embassy_time::Ticker;

use crate::color::Rgb;
use crate::config::PLAYER;
use crate::driver::LedDriver;
use crate::player::Player;

/// Render loop over a strip of at most `N` pixels
///
/// Generic over `D: LedDriver` to support different hardware backends.
pub struct RenderLoop<'a, D: LedDriver, const N: usize> {
    player: &'a Player,
    driver: D,
    pixels: [Rgb; N],
    /// Number of pixels actually rendered and pushed
    len: usize,
}

impl<'a, D: LedDriver, const N: usize> RenderLoop<'a, D, N> {
    /// Create a loop for a strip of `len` LEDs, clamped to the buffer size
    pub fn new(player: &'a Player, driver: D, len: usize) -> Self {
        if len > N {
            log::warn!("render: strip of {} LEDs truncated to {}", len, N);
        }
        Self {
            player,
            driver,
            pixels: [Rgb::default(); N],
            len: len.min(N),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pixels of the last rendered frame
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels[..self.len]
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Render one frame and push it to the strip.
    ///
    /// A driver failure is logged; the next frame is attempted as usual.
    pub fn render_frame(&mut self) {
        let frame = &mut self.pixels[..self.len];
        self.player.render(frame);
        if let Err(err) = self.driver.write(frame) {
            log::error!("render: couldn't update strip: {:?}", err);
        }
    }

    /// Run the loop indefinitely at the configured period
    pub async fn run(&mut self) -> ! {
        let mut ticker = Ticker::every(PLAYER.render_period);
        log::info!("render: {} LEDs every {} ms", self.len, PLAYER.render_period.as_millis());
        loop {
            self.render_frame();
            ticker.next().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PersistedContext;
    use crate::driver::LedError;

    struct FailingDriver {
        attempts: usize,
    }

    impl LedDriver for FailingDriver {
        fn write(&mut self, _pixels: &[Rgb]) -> Result<(), LedError> {
            self.attempts += 1;
            Err(LedError::WriteFailed)
        }
    }

    #[test]
    fn length_clamped_to_buffer() {
        let player = Player::new(PersistedContext::default());
        let render = RenderLoop::<_, 8>::new(&player, FailingDriver { attempts: 0 }, 20);
        assert_eq!(render.len(), 8);
    }

    #[test]
    fn driver_error_does_not_stop_rendering() {
        let player = Player::new(PersistedContext::default());
        let mut render = RenderLoop::<_, 4>::new(&player, FailingDriver { attempts: 0 }, 4);
        render.render_frame();
        render.render_frame();
        assert_eq!(render.driver().attempts, 2);
        assert!(render.pixels().iter().all(|p| *p != Rgb::default()));
    }
}

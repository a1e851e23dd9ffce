//! Player state and controller
//!
//! The [`Player`] owns the user adjustable state of the strip. Every setter
//! runs under one critical-section mutex, so a mode switch, its strategy
//! swap and the cursor bookkeeping are atomic end to end. Mode, color,
//! brightness and speed are mirrored in atomics so the render loop can read
//! them without taking the lock.

use core::cell::RefCell;
use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::color::{COLOR_MAX, Rgb};
use crate::context::PersistedContext;
use crate::mode::Mode;
use crate::pattern::{PatternSlot, scaled_brightness};

const BRIGHTNESS_MAX: u8 = 100;

struct PlayerInner {
    /// Copy of what the saver writes back
    context: PersistedContext,
    pattern: PatternSlot,
}

pub struct Player {
    state: Mutex<CriticalSectionRawMutex, RefCell<PlayerInner>>,
    mode: AtomicU8,
    color: AtomicU32,
    brightness: AtomicU8,
    speed: AtomicU8,
    save_request: Signal<CriticalSectionRawMutex, ()>,
}

impl Player {
    /// Build the player from a restored (or default) context.
    ///
    /// Applies the mode, then the brightness. A save is requested only when
    /// the stored values had to be normalized.
    pub fn new(context: PersistedContext) -> Self {
        let restored = Mode::clamped(context.mode);
        let player = Self {
            state: Mutex::new(RefCell::new(PlayerInner {
                context,
                pattern: PatternSlot::new(restored, context.color_index[restored.index()]),
            })),
            mode: AtomicU8::new(Mode::WhiteCold.as_u8()),
            color: AtomicU32::new(0),
            brightness: AtomicU8::new(0),
            speed: AtomicU8::new(0),
            save_request: Signal::new(),
        };

        let brightness = u8::try_from(context.brightness.min(u32::from(BRIGHTNESS_MAX)))
            .unwrap_or(BRIGHTNESS_MAX);
        player.with_inner(|inner| {
            player.set_mode_locked(inner, context.mode);
            player.set_brightness_locked(inner, brightness);
        });
        player
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut PlayerInner) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    fn request_save(&self) {
        self.save_request.signal(());
    }

    // === Setters ===

    /// Switch mode; values at or above the placeholder select `WhiteCold`
    pub fn set_mode(&self, mode: u32) {
        self.with_inner(|inner| self.set_mode_locked(inner, mode));
    }

    /// Advance to the next mode, wrapping to the first one
    pub fn increment_mode(&self) {
        self.with_inner(|inner| {
            let next = u32::from(self.mode.load(Ordering::Relaxed)) + 1;
            self.set_mode_locked(inner, next);
        });
    }

    /// Ask the active pattern to resolve a color request.
    ///
    /// Values above `0xFFFFFF` are clamped to 0. The published color is the
    /// pattern's answer, not the request.
    pub fn set_color(&self, color: u32) {
        self.with_inner(|inner| self.set_color_locked(inner, color));
    }

    /// Move the active pattern to its next color.
    ///
    /// Each pattern owns its step; `step` is only reported in the log.
    pub fn increment_color(&self, step: u32) {
        self.with_inner(|inner| {
            log::debug!("player: increment color (step {})", step);
            inner.pattern.increment_color();
            let color = self.color.load(Ordering::Relaxed);
            self.set_color_locked(inner, color);
        });
    }

    pub fn set_brightness(&self, brightness: u8) {
        self.with_inner(|inner| self.set_brightness_locked(inner, brightness));
    }

    /// Step the brightness up, restarting from 0 when it would pass 100
    pub fn increment_brightness(&self, step: u8) {
        self.with_inner(|inner| {
            let current = u16::from(self.brightness.load(Ordering::Relaxed));
            let step = u16::from(step);
            let base = if current + step > u16::from(BRIGHTNESS_MAX) {
                0
            } else {
                current
            };
            let next = u8::try_from(base + step).unwrap_or(BRIGHTNESS_MAX);
            self.set_brightness_locked(inner, next);
        });
    }

    /// Store the animation speed. Speed is not part of the persisted context.
    pub fn set_speed(&self, speed: u8) {
        self.with_inner(|_| {
            let previous = self.speed.swap(speed, Ordering::Relaxed);
            log::info!("player: speed {} (was {})", speed, previous);
        });
    }

    fn set_mode_locked(&self, inner: &mut PlayerInner, raw: u32) {
        let mode = Mode::clamped(raw);
        if u32::from(mode.as_u8()) != raw {
            log::debug!("player: mode {} clamped to {}", raw, mode.as_str());
        }

        let previous = self.mode.swap(mode.as_u8(), Ordering::Relaxed);
        // Same mode keeps the running pattern and its animation frame
        if inner.pattern.mode() != mode {
            inner.pattern = PatternSlot::new(mode, inner.context.color_index[mode.index()]);
        }
        let color = self.color.load(Ordering::Relaxed);
        self.set_color_locked(inner, color);

        if inner.context.mode != u32::from(mode.as_u8()) {
            inner.context.mode = u32::from(mode.as_u8());
            self.request_save();
        }
        log::info!("player: mode {} (was {})", mode.as_str(), previous);
    }

    fn set_color_locked(&self, inner: &mut PlayerInner, color: u32) {
        let requested = if color > COLOR_MAX {
            log::debug!("player: color {:#x} out of range", color);
            0
        } else {
            color
        };

        let selection = inner.pattern.resolve_color(requested);
        let previous = self.color.swap(selection.rgb, Ordering::Relaxed);
        log::info!(
            "player: color {:06x} index {} (was {:06x})",
            selection.rgb,
            selection.index,
            previous
        );

        let cursor = &mut inner.context.color_index[inner.pattern.mode().index()];
        if *cursor != selection.index {
            *cursor = selection.index;
            self.request_save();
        }
    }

    fn set_brightness_locked(&self, inner: &mut PlayerInner, brightness: u8) {
        let brightness = brightness.min(BRIGHTNESS_MAX);
        let previous = self.brightness.swap(brightness, Ordering::Relaxed);
        log::info!("player: brightness {} (was {})", brightness, previous);

        if inner.context.brightness != u32::from(brightness) {
            inner.context.brightness = u32::from(brightness);
            self.request_save();
        }
    }

    // === Getters ===

    pub fn mode(&self) -> Mode {
        Mode::from_raw(u32::from(self.mode.load(Ordering::Relaxed))).unwrap_or_default()
    }

    /// Published 0xRRGGBB color
    pub fn color(&self) -> u32 {
        self.color.load(Ordering::Relaxed)
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    pub fn speed(&self) -> u8 {
        self.speed.load(Ordering::Relaxed)
    }

    /// Snapshot of the context to persist
    pub fn context(&self) -> PersistedContext {
        self.with_inner(|inner| inner.context)
    }

    /// Fill `pixels` with the next frame of the active pattern
    pub fn render(&self, pixels: &mut [Rgb]) {
        let color = self.color.load(Ordering::Relaxed);
        let divisor = scaled_brightness(self.brightness.load(Ordering::Relaxed));
        self.with_inner(|inner| inner.pattern.render(pixels, divisor, color));
    }

    // === Save requests ===

    /// Wait until a mutation asks for the context to be saved
    pub async fn wait_save_request(&self) {
        self.save_request.wait().await;
    }

    /// Consume a pending save request, if any
    pub fn take_save_request(&self) -> bool {
        self.save_request.try_take().is_some()
    }
}

#![cfg_attr(not(test), no_std)]

//! Lumen player - LED strip state, patterns and persistence
//!
//! Architecture layers:
//! - `pattern` - Color strategies (`[Pattern]` trait + [`PatternSlot`] enum)
//! - `player` - Guarded player state and its setters
//! - `render` - Periodic render loop driving a [`LedDriver`]
//! - `storage` - Magic/CRC framed records on NOR flash
//! - `context` - Persisted player context (mode, brightness, color cursors)
//! - `factory` - Factory identity record (strip length, RGBW flag)
//! - `saver` - Debounced context write-back
//! - `input`, `attrs` - Boundary adapters for touch and wireless attributes
//! - `provision` - Console commands for the factory record
//!
//! Everything here is hardware-agnostic; the firmware crate provides the
//! flash, LED and button implementations.

pub mod attrs;
pub mod color;
pub mod config;
pub mod context;
pub mod driver;
pub mod factory;
pub mod input;
pub mod mode;
pub mod pattern;
pub mod player;
pub mod provision;
pub mod render;
pub mod saver;
pub mod storage;

pub use attrs::{Attribute, AttributeError, read_attribute, write_attribute};
pub use color::{Rgb, rgb_from_u32, rgb_to_u32};
pub use context::{ContextStore, PersistedContext};
pub use driver::{LedDriver, LedError};
pub use factory::{FactoryError, FactoryIdentity, FactoryStore};
pub use input::{InputAction, InputEvent, handle_event};
pub use mode::{MODE_COUNT, Mode};
pub use pattern::{ColorSelection, Pattern, PatternSlot, scaled_brightness};
pub use player::Player;
pub use provision::{CommandError, ProvisionCommand, run_line};
pub use render::RenderLoop;
pub use saver::run_saver;
pub use storage::{Encodable, FlashRegion, StorageError};

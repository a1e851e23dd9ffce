//! Persisted player context
//!
//! Holds everything the player restores after a power cycle. The record
//! lives in its own flash region, framed by [`FlashRegion`].

use embedded_storage::nor_flash::NorFlash;

use crate::config::PLAYER;
use crate::mode::MODE_COUNT;
use crate::storage::{Encodable, FlashRegion, MAGIC_SIZE, StorageError, read_u32};

pub const CONTEXT_MAGIC: [u8; MAGIC_SIZE] = *b"MAGICUCU";
/// Encoded payload size: mode, brightness and one cursor per mode
pub const CONTEXT_SIZE: usize = 4 * (2 + MODE_COUNT);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedContext {
    pub mode: u32,
    pub brightness: u32,
    /// Last color cursor of every mode
    pub color_index: [u32; MODE_COUNT],
}

impl Default for PersistedContext {
    fn default() -> Self {
        Self {
            mode: 0,
            brightness: u32::from(PLAYER.default_brightness),
            color_index: [0; MODE_COUNT],
        }
    }
}

impl Encodable<CONTEXT_SIZE> for PersistedContext {
    fn encode(self) -> [u8; CONTEXT_SIZE] {
        let mut data = [0u8; CONTEXT_SIZE];
        data[0..4].copy_from_slice(&self.mode.to_le_bytes());
        data[4..8].copy_from_slice(&self.brightness.to_le_bytes());
        for (chunk, index) in data[8..].chunks_exact_mut(4).zip(self.color_index) {
            chunk.copy_from_slice(&index.to_le_bytes());
        }
        data
    }

    fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < CONTEXT_SIZE {
            return None;
        }
        let mut color_index = [0u32; MODE_COUNT];
        for (i, index) in color_index.iter_mut().enumerate() {
            *index = read_u32(data, 8 + i * 4)?;
        }
        Some(Self {
            mode: read_u32(data, 0)?,
            brightness: read_u32(data, 4)?,
            color_index,
        })
    }
}

/// Context persistence on a NOR flash device
pub struct ContextStore<F: NorFlash> {
    flash: F,
    region: FlashRegion,
}

impl<F: NorFlash> ContextStore<F> {
    /// Bind the store to the erase unit at `offset`
    pub fn open(flash: F, offset: u32) -> Result<Self, StorageError> {
        let region = FlashRegion::open(&flash, offset, CONTEXT_MAGIC, CONTEXT_SIZE)?;
        Ok(Self { flash, region })
    }

    pub fn read(&mut self) -> Result<PersistedContext, StorageError> {
        self.region
            .read::<F, PersistedContext, CONTEXT_SIZE>(&mut self.flash)
    }

    pub fn write(&mut self, context: &PersistedContext) -> Result<(), StorageError> {
        self.region
            .write::<F, PersistedContext, CONTEXT_SIZE>(&mut self.flash, *context)
    }

    /// Read the stored context, falling back to defaults on any error
    pub fn load_or_default(&mut self) -> PersistedContext {
        match self.read() {
            Ok(context) => {
                log::info!(
                    "context: restored mode {} brightness {}",
                    context.mode,
                    context.brightness
                );
                context
            }
            Err(err) if err.is_absent_or_corrupt() => {
                log::warn!("context: no valid record ({:?}), using defaults", err);
                PersistedContext::default()
            }
            Err(err) => {
                log::error!("context: storage unavailable ({:?}), using defaults", err);
                PersistedContext::default()
            }
        }
    }

    pub fn region(&self) -> &FlashRegion {
        &self.region
    }

    /// Underlying device
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let context = PersistedContext::default();
        assert_eq!(context.mode, 0);
        assert_eq!(context.brightness, 50);
        assert_eq!(context.color_index, [0; MODE_COUNT]);
    }

    #[test]
    fn payload_layout() {
        let context = PersistedContext {
            mode: 2,
            brightness: 80,
            color_index: [1, 2, 0x0102_0304, 4, 5],
        };
        let data = context.encode();
        assert_eq!(CONTEXT_SIZE, 28);
        assert_eq!(data[0..4], [2, 0, 0, 0]);
        assert_eq!(data[4..8], [80, 0, 0, 0]);
        assert_eq!(data[16..20], [4, 3, 2, 1]);
        assert_eq!(PersistedContext::decode(&data), Some(context));
    }

    #[test]
    fn decode_short_buffer() {
        assert_eq!(PersistedContext::decode(&[0u8; 12]), None);
    }
}

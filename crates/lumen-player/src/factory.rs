//! Factory identity record
//!
//! Written once during provisioning; tells the firmware how many LEDs the
//! strip has and whether it carries a white channel.

use embedded_storage::nor_flash::NorFlash;

use crate::config::STRIP;
use crate::storage::{Encodable, FlashRegion, MAGIC_SIZE, StorageError, read_u32};

pub const FACTORY_MAGIC: [u8; MAGIC_SIZE] = *b"MAGICOCO";
pub const FACTORY_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryError {
    /// Requested strip length above the supported maximum
    TooManyLeds(u32),
    Storage(StorageError),
}

impl From<StorageError> for FactoryError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryIdentity {
    pub led_length: u32,
    pub rgbw: bool,
}

impl Default for FactoryIdentity {
    fn default() -> Self {
        Self {
            led_length: STRIP.default_led_length,
            rgbw: false,
        }
    }
}

impl Encodable<FACTORY_SIZE> for FactoryIdentity {
    fn encode(self) -> [u8; FACTORY_SIZE] {
        let mut data = [0u8; FACTORY_SIZE];
        data[0..4].copy_from_slice(&self.led_length.to_le_bytes());
        data[4..8].copy_from_slice(&u32::from(self.rgbw).to_le_bytes());
        data
    }

    fn decode(data: &[u8]) -> Option<Self> {
        Some(Self {
            led_length: read_u32(data, 0)?,
            rgbw: read_u32(data, 4)? != 0,
        })
    }
}

/// Factory record access
pub struct FactoryStore<F: NorFlash> {
    flash: F,
    region: FlashRegion,
}

impl<F: NorFlash> FactoryStore<F> {
    pub fn open(flash: F, offset: u32) -> Result<Self, StorageError> {
        let region = FlashRegion::open(&flash, offset, FACTORY_MAGIC, FACTORY_SIZE)?;
        Ok(Self { flash, region })
    }

    pub fn read(&mut self) -> Result<FactoryIdentity, StorageError> {
        self.region
            .read::<F, FactoryIdentity, FACTORY_SIZE>(&mut self.flash)
    }

    pub fn write(&mut self, identity: &FactoryIdentity) -> Result<(), FactoryError> {
        if identity.led_length > STRIP.max_led_length {
            return Err(FactoryError::TooManyLeds(identity.led_length));
        }
        self.region
            .write::<F, FactoryIdentity, FACTORY_SIZE>(&mut self.flash, *identity)?;
        log::info!(
            "factory: led_length {} rgbw {}",
            identity.led_length,
            identity.rgbw
        );
        Ok(())
    }

    /// Stored identity, or the built-in defaults when there is none
    pub fn load_or_default(&mut self) -> FactoryIdentity {
        self.read().unwrap_or_else(|err| {
            log::warn!("factory: no valid record ({:?}), using defaults", err);
            FactoryIdentity::default()
        })
    }

    /// Provision the strip length, keeping the other fields
    pub fn set_led_length(&mut self, led_length: u32) -> Result<FactoryIdentity, FactoryError> {
        let identity = FactoryIdentity {
            led_length,
            ..self.load_or_default()
        };
        self.write(&identity)?;
        Ok(identity)
    }

    /// Provision the white channel flag, keeping the other fields
    pub fn set_rgbw(&mut self, rgbw: bool) -> Result<FactoryIdentity, FactoryError> {
        let identity = FactoryIdentity {
            rgbw,
            ..self.load_or_default()
        };
        self.write(&identity)?;
        Ok(identity)
    }

    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }
}

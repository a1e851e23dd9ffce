//! Host doubles for the hardware the player talks to.

use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashErrorKind, ReadNorFlash, check_erase, check_read, check_write,
};
use lumen_player::{LedDriver, LedError, Rgb};

pub const ERASE_SIZE: usize = 4096;

/// NOR flash kept in memory
///
/// Erase sets bytes to `0xFF`, writes can only clear bits, like the real
/// part. Failures can be injected per operation.
pub struct MemFlash {
    pub data: Vec<u8>,
    pub reads: usize,
    pub writes: usize,
    pub erases: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemFlash {
    /// Erased device of `sectors` erase units
    pub fn new(sectors: usize) -> Self {
        Self {
            data: vec![0xFF; sectors * ERASE_SIZE],
            reads: 0,
            writes: 0,
            erases: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    pub fn flip_bit(&mut self, offset: usize, bit: u8) {
        self.data[offset] ^= 1 << bit;
    }
}

impl ErrorType for MemFlash {
    type Error = NorFlashErrorKind;
}

impl ReadNorFlash for MemFlash {
    const READ_SIZE: usize = 4;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        check_read(self, offset, bytes.len())?;
        if self.fail_reads {
            return Err(NorFlashErrorKind::Other);
        }
        self.reads += 1;
        let start = offset as usize;
        bytes.copy_from_slice(&self.data[start..start + bytes.len()]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }
}

impl NorFlash for MemFlash {
    const WRITE_SIZE: usize = 4;
    const ERASE_SIZE: usize = ERASE_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        check_erase(self, from, to)?;
        if self.fail_writes {
            return Err(NorFlashErrorKind::Other);
        }
        self.erases += 1;
        self.data[from as usize..to as usize].fill(0xFF);
        Ok(())
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        check_write(self, offset, bytes.len())?;
        if self.fail_writes {
            return Err(NorFlashErrorKind::Other);
        }
        self.writes += 1;
        let start = offset as usize;
        for (cell, byte) in self.data[start..start + bytes.len()].iter_mut().zip(bytes) {
            *cell &= *byte;
        }
        Ok(())
    }
}

/// LED driver keeping every frame it was asked to show
#[derive(Default)]
pub struct RecordingDriver {
    pub frames: Vec<Vec<Rgb>>,
    pub fail: bool,
}

impl RecordingDriver {
    pub fn last_frame(&self) -> Option<&[Rgb]> {
        self.frames.last().map(Vec::as_slice)
    }
}

impl LedDriver for RecordingDriver {
    fn write(&mut self, pixels: &[Rgb]) -> Result<(), LedError> {
        if self.fail {
            return Err(LedError::WriteFailed);
        }
        self.frames.push(pixels.to_vec());
        Ok(())
    }
}

//! Framed records on NOR flash
//!
//! Every record occupies the start of its own erase unit and is laid out as
//! `magic[8] | payload | format_revision:u32 | crc32:u32` (little-endian).
//! The CRC covers every byte before the CRC field.

use crc32fast::Hasher;
use embedded_storage::nor_flash::NorFlash;

use crate::config::STORAGE;

pub const MAGIC_SIZE: usize = 8;
pub const FORMAT_REVISION: u32 = 1;
const REVISION_SIZE: usize = 4;
const CRC_SIZE: usize = 4;
/// Scratch buffer size; framed records must fit in it
const MAX_FRAME_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The flash device reported a failure
    DriverError,
    /// No record with the expected magic
    NotFound,
    /// Record present but its CRC does not match
    ChecksumMismatch,
    /// Record written by an unknown format revision
    UnsupportedRevision(u32),
    /// Region misaligned, outside the device or too small for the record
    RegionOutOfBounds,
}

impl StorageError {
    /// True when the device works but holds no usable record
    pub fn is_absent_or_corrupt(self) -> bool {
        matches!(
            self,
            Self::NotFound | Self::ChecksumMismatch | Self::UnsupportedRevision(_)
        )
    }
}

pub trait Encodable<const SIZE: usize>
where
    Self: Sized,
{
    fn encode(self) -> [u8; SIZE];
    fn decode(data: &[u8]) -> Option<Self>;
}

/// Read a little-endian u32 at `offset`
pub(crate) fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset + 4)?;
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    Some(u32::from_le_bytes(word))
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

const fn frame_len(payload_size: usize) -> usize {
    MAGIC_SIZE + payload_size + REVISION_SIZE + CRC_SIZE
}

/// Round `len` up to a multiple of `align`
const fn align_up(len: usize, align: usize) -> usize {
    if align <= 1 {
        len
    } else {
        len.div_ceil(align) * align
    }
}

/// One erase unit of the flash reserved for a single record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashRegion {
    offset: u32,
    magic: [u8; MAGIC_SIZE],
    payload_size: usize,
}

impl FlashRegion {
    /// Validate a region at `offset` for records of `payload_size` bytes
    pub fn open<F: NorFlash>(
        flash: &F,
        offset: u32,
        magic: [u8; MAGIC_SIZE],
        payload_size: usize,
    ) -> Result<Self, StorageError> {
        let erase_unit = STORAGE.erase_unit;
        let end = offset
            .checked_add(erase_unit)
            .ok_or(StorageError::RegionOutOfBounds)?;
        let io_len = Self::io_len::<F>(payload_size);

        let aligned = offset % erase_unit == 0 && erase_unit as usize % F::ERASE_SIZE.max(1) == 0;
        let inside = end as usize <= flash.capacity();
        let fits = io_len <= MAX_FRAME_SIZE && io_len <= erase_unit as usize;
        if !(aligned && inside && fits) {
            log::warn!(
                "storage: region 0x{:08x} rejected (aligned: {}, inside: {}, fits: {})",
                offset,
                aligned,
                inside,
                fits
            );
            return Err(StorageError::RegionOutOfBounds);
        }

        Ok(Self {
            offset,
            magic,
            payload_size,
        })
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Bytes transferred per read or write, padded to the device granularity
    fn io_len<F: NorFlash>(payload_size: usize) -> usize {
        let align = F::READ_SIZE.max(F::WRITE_SIZE);
        align_up(frame_len(payload_size), align)
    }

    fn check_payload(&self, size: usize) -> Result<(), StorageError> {
        if size == self.payload_size {
            Ok(())
        } else {
            Err(StorageError::RegionOutOfBounds)
        }
    }

    /// Read and validate the record at the start of the region
    pub fn read<F, T, const SIZE: usize>(&self, flash: &mut F) -> Result<T, StorageError>
    where
        F: NorFlash,
        T: Encodable<SIZE>,
    {
        self.check_payload(SIZE)?;
        let io_len = Self::io_len::<F>(SIZE);
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        flash
            .read(self.offset, &mut buffer[..io_len])
            .map_err(|_| StorageError::DriverError)?;

        if buffer[..MAGIC_SIZE] != self.magic {
            log::debug!("storage: no record at 0x{:08x}", self.offset);
            return Err(StorageError::NotFound);
        }

        let revision_offset = MAGIC_SIZE + SIZE;
        let crc_offset = revision_offset + REVISION_SIZE;
        let stored_crc = read_u32(&buffer, crc_offset).ok_or(StorageError::NotFound)?;
        let computed_crc = compute_crc(&buffer[..crc_offset]);
        if stored_crc != computed_crc {
            log::warn!(
                "storage: crc mismatch at 0x{:08x} (expected {:08x}, found {:08x})",
                self.offset,
                computed_crc,
                stored_crc
            );
            return Err(StorageError::ChecksumMismatch);
        }

        let revision = read_u32(&buffer, revision_offset).ok_or(StorageError::NotFound)?;
        if revision != FORMAT_REVISION {
            return Err(StorageError::UnsupportedRevision(revision));
        }

        T::decode(&buffer[MAGIC_SIZE..revision_offset]).ok_or(StorageError::NotFound)
    }

    /// Erase the region and write `value` as a fresh record
    pub fn write<F, T, const SIZE: usize>(&self, flash: &mut F, value: T) -> Result<(), StorageError>
    where
        F: NorFlash,
        T: Encodable<SIZE>,
    {
        self.check_payload(SIZE)?;
        let io_len = Self::io_len::<F>(SIZE);
        let mut buffer = [0xFFu8; MAX_FRAME_SIZE];

        let revision_offset = MAGIC_SIZE + SIZE;
        let crc_offset = revision_offset + REVISION_SIZE;
        buffer[..MAGIC_SIZE].copy_from_slice(&self.magic);
        buffer[MAGIC_SIZE..revision_offset].copy_from_slice(&value.encode());
        buffer[revision_offset..crc_offset].copy_from_slice(&FORMAT_REVISION.to_le_bytes());
        let crc = compute_crc(&buffer[..crc_offset]);
        buffer[crc_offset..crc_offset + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());

        flash
            .erase(self.offset, self.offset + STORAGE.erase_unit)
            .map_err(|_| StorageError::DriverError)?;
        flash
            .write(self.offset, &buffer[..io_len])
            .map_err(|_| StorageError::DriverError)?;

        log::debug!("storage: wrote {} bytes at 0x{:08x}", io_len, self.offset);
        Ok(())
    }
}

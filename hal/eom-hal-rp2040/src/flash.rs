//! Configuration partition on the RP2040 QSPI flash
//!
//! The top 64 KiB of flash form a `sequential-storage` map keyed by
//! [`StorageKey`]. The device writes one small record, rarely, so the map
//! runs without a cache and every access scans the partition.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use eom_hal::flash::{FlashError, StorageKey};

/// Size of the on-board flash chip
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Size of the configuration partition at the top of flash
pub const CONFIG_PARTITION_SIZE: usize = 64 * 1024;

/// Largest item the map will hold; also the scratch buffer size
pub const MAX_ITEM_SIZE: usize = 2048;

/// Partition bounds as flash offsets
pub const CONFIG_RANGE: core::ops::Range<u32> =
    ((FLASH_SIZE - CONFIG_PARTITION_SIZE) as u32)..(FLASH_SIZE as u32);

/// Flash-backed [`eom_hal::FlashStorage`]
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    scratch: [u8; MAX_ITEM_SIZE],
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            scratch: [0; MAX_ITEM_SIZE],
        }
    }

    /// Look up `key`; the returned slice borrows the scratch buffer
    async fn fetch(&mut self, key: StorageKey) -> Result<Option<&[u8]>, FlashError> {
        map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut self.scratch,
            &key,
        )
        .await
        .map_err(map_error)
    }
}

fn map_error<E>(e: sequential_storage::Error<E>) -> FlashError {
    match e {
        sequential_storage::Error::Storage { .. } => FlashError::Flash,
        sequential_storage::Error::FullStorage => FlashError::Full,
        sequential_storage::Error::Corrupted { .. } => FlashError::Corrupted,
        sequential_storage::Error::BufferTooSmall => FlashError::BufferTooSmall,
        _ => FlashError::Storage,
    }
}

impl<'d> eom_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let data = self.fetch(key).await?.ok_or(FlashError::NotFound)?;
        let target = buffer
            .get_mut(..data.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(data);
        Ok(data.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        if data.len() > MAX_ITEM_SIZE {
            return Err(FlashError::BufferTooSmall);
        }

        map::store_item(
            &mut self.flash,
            CONFIG_RANGE,
            &mut NoCache::new(),
            &mut self.scratch,
            &key,
            &data,
        )
        .await
        .map_err(map_error)
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        matches!(self.fetch(key).await, Ok(Some(_)))
    }

    async fn erase_all(&mut self) -> Result<(), FlashError> {
        self.flash
            .erase(CONFIG_RANGE.start, CONFIG_RANGE.end)
            .await
            .map_err(|_| FlashError::Flash)
    }
}

/// Storage type used by the firmware
pub type FlashStorage<'d> = Rp2040FlashStorage<'d>;

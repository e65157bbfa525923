//! Configuration record in the flash key/value partition
//!
//! The record is stored under [`StorageKey::DeviceConfig`] in the
//! envelope produced by `eom_core::config::encode_record`.

use defmt::*;

use eom_core::config::{decode_record, encode_record, ConfigRecord};
use eom_core::traits::{ConfigStorage, StorageError};
use eom_hal_rp2040::flash::{FlashError, FlashStorage, MAX_ITEM_SIZE};
use eom_hal_rp2040::{FlashStorageTrait, StorageKey};

/// [`ConfigStorage`] over the RP2040 flash partition
pub struct FlashConfigStorage<'d> {
    flash: FlashStorage<'d>,
}

impl<'d> FlashConfigStorage<'d> {
    pub fn new(flash: FlashStorage<'d>) -> Self {
        Self { flash }
    }

    /// Whether a record has ever been written
    pub async fn has_record(&mut self) -> bool {
        self.flash.exists(StorageKey::DeviceConfig).await
    }
}

impl<'d> ConfigStorage for FlashConfigStorage<'d> {
    async fn load(&mut self) -> Result<ConfigRecord, StorageError> {
        let mut buf = [0u8; MAX_ITEM_SIZE];
        let len = self
            .flash
            .read(StorageKey::DeviceConfig, &mut buf)
            .await
            .map_err(storage_error)?;

        let record = decode_record(&buf[..len])?;
        debug!("Loaded configuration ({} bytes)", len);
        Ok(record)
    }

    async fn write(&mut self, record: &ConfigRecord) -> Result<(), StorageError> {
        let mut buf = [0u8; MAX_ITEM_SIZE];
        let len = encode_record(record, &mut buf).map_err(|e| {
            error!("Failed to encode configuration: {}", e);
            StorageError::Io
        })?;

        self.flash
            .write(StorageKey::DeviceConfig, &buf[..len])
            .await
            .map_err(storage_error)?;

        info!("Saved configuration ({} bytes)", len);
        Ok(())
    }

    async fn erase(&mut self) -> Result<(), StorageError> {
        self.flash.erase_all().await.map_err(storage_error)?;
        info!("Configuration partition erased");
        Ok(())
    }
}

fn storage_error(e: FlashError) -> StorageError {
    match e {
        FlashError::NotFound => StorageError::NotFound,
        FlashError::Corrupted | FlashError::BufferTooSmall => StorageError::Corrupt,
        FlashError::Flash | FlashError::Storage | FlashError::Full => StorageError::Io,
    }
}

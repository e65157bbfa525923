//! Persistent key/value storage
//!
//! The device keeps a single record in flash: its configuration. Chip
//! crates provide the wear levelling; this module only fixes the key
//! space, the error set and the async access trait.

/// Items kept in the storage partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Configuration record envelope
    DeviceConfig = 0x01,
}

impl StorageKey {
    pub const ALL: [StorageKey; 1] = [StorageKey::DeviceConfig];

    /// On-flash key byte
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Key for an on-flash byte; unknown bytes are items from another layout
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_u8() == value)
    }
}

/// Storage failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral rejected a read, program or erase
    Flash,
    /// The map layer failed for another reason
    Storage,
    /// No item under this key
    NotFound,
    /// Item does not fit the caller's buffer
    BufferTooSmall,
    /// Partition contents failed their integrity check
    Corrupted,
    /// No room left even after garbage collection
    Full,
}

/// Async access to the storage partition
pub trait FlashStorage {
    /// Copy the item stored under `key` into `buffer`, returning its length
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Replace the item stored under `key`
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    /// Whether an item is stored under `key`
    fn exists(&mut self, key: StorageKey) -> impl core::future::Future<Output = bool>;

    /// Erase the whole partition
    ///
    /// Used by factory reset; every key reads as `NotFound` afterwards.
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}

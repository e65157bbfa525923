//! Configuration storage backend trait

use crate::config::ConfigRecord;

/// Errors from the storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No record has been stored yet
    NotFound,
    /// A record exists but failed validation
    Corrupt,
    /// The medium reported an I/O failure
    Io,
}

/// Durable storage for the configuration record
///
/// Format and location are up to the implementation.
pub trait ConfigStorage {
    /// Load the stored record
    fn load(&mut self) -> impl core::future::Future<Output = Result<ConfigRecord, StorageError>>;

    /// Write the record through to the medium
    fn write(
        &mut self,
        record: &ConfigRecord,
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Remove the stored record; the next load reports `NotFound`
    fn erase(&mut self) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

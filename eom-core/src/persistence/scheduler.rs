//! Single-slot save deadline

use crate::config::ConfigRecord;
use crate::traits::{ConfigStorage, StorageError};

/// Delay applied to saves requested by registry setters
pub const DEFAULT_SAVE_DELAY_MS: u64 = 500;

/// A due commit reached the storage backend and failed
///
/// The pending deadline is already cleared when this is returned; the
/// caller decides whether to request another save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistenceFailed(pub StorageError);

/// Debounced deadline for committing the configuration record
///
/// Holds at most one deadline. A new request replaces the old one, so a
/// stream of edits keeps pushing the commit back until the edits stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistenceScheduler {
    pending: Option<u64>,
}

impl PersistenceScheduler {
    /// Create a scheduler with nothing pending
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Set the pending deadline, replacing any earlier one
    pub fn request_save(&mut self, deadline_ms: u64) {
        self.pending = Some(deadline_ms);
    }

    /// Drop the pending deadline, if any
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Current pending deadline
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Whether a commit would happen at `now_ms`
    pub fn is_due(&self, now_ms: u64) -> bool {
        matches!(self.pending, Some(deadline) if now_ms >= deadline)
    }

    /// Commit the record if the deadline has passed
    ///
    /// Returns `Ok(true)` if a write happened, `Ok(false)` if nothing was
    /// due. Storage is touched only when due.
    pub async fn tick<S: ConfigStorage>(
        &mut self,
        now_ms: u64,
        record: &ConfigRecord,
        storage: &mut S,
    ) -> Result<bool, PersistenceFailed> {
        if !self.is_due(now_ms) {
            return Ok(false);
        }

        self.pending = None;

        match storage.write(record).await {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("config committed at {} ms", now_ms);
                Ok(true)
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("config commit failed: {}", e);
                Err(PersistenceFailed(e))
            }
        }
    }
}

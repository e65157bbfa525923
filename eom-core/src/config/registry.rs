//! Name-keyed access to the configuration record

use super::field::{ConfigField, FieldKind, FieldText};
use super::fields::FIELDS;
use super::record::ConfigRecord;
use super::ConfigError;
use crate::persistence::{PersistenceFailed, PersistenceScheduler, DEFAULT_SAVE_DELAY_MS};
use crate::traits::{ConfigStorage, StorageError};

/// Result of a successful [`ConfigRegistry::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SetOutcome {
    /// The stored value changed
    pub applied: bool,
    /// The new value only takes effect after a reboot
    pub reboot_required: bool,
}

/// How the record was obtained at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadOutcome {
    /// Loaded from storage
    Loaded,
    /// Loaded, but this many fields held out-of-range values and were
    /// reset to their defaults
    Repaired(u8),
    /// Storage failed; defaults were applied
    Defaulted(StorageError),
}

/// One entry of [`ConfigRegistry::enumerate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: &'static str,
    pub kind: FieldKind,
    pub value: FieldText,
}

/// Owner of the configuration record
///
/// All reads and writes go through field names so every mutation can
/// schedule a save. The field table is fixed; only slot contents change.
pub struct ConfigRegistry {
    record: ConfigRecord,
    fields: &'static [ConfigField],
    saves: PersistenceScheduler,
    erase_pending: bool,
}

impl ConfigRegistry {
    /// Wrap an existing record
    pub fn new(record: ConfigRecord) -> Self {
        Self {
            record,
            fields: &FIELDS,
            saves: PersistenceScheduler::new(),
            erase_pending: false,
        }
    }

    /// Registry holding the default record
    pub fn with_defaults() -> Self {
        Self::new(ConfigRecord::default())
    }

    /// Registered fields in registration order
    pub fn fields(&self) -> &'static [ConfigField] {
        self.fields
    }

    /// Read-only view of the record
    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    /// Look up a field descriptor by name
    pub fn find(&self, name: &str) -> Option<&'static ConfigField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Current value of `name` as text
    pub fn get(&self, name: &str) -> Result<FieldText, ConfigError> {
        let field = self.find(name).ok_or(ConfigError::UnknownField)?;
        Ok(field.format(&self.record))
    }

    /// Parse and store a new value for `name`
    ///
    /// On success a save is requested `DEFAULT_SAVE_DELAY_MS` after
    /// `now_ms`. On error the stored value is left unchanged and no save
    /// is requested.
    pub fn set(&mut self, name: &str, value: &str, now_ms: u64) -> Result<SetOutcome, ConfigError> {
        let field = self.find(name).ok_or(ConfigError::UnknownField)?;
        let applied = field.parse_into(&mut self.record, value)?;

        self.saves
            .request_save(now_ms.saturating_add(DEFAULT_SAVE_DELAY_MS));

        Ok(SetOutcome {
            applied,
            reboot_required: field.reboot_required(),
        })
    }

    /// Write every field's default into its slot
    ///
    /// The origin path is kept.
    pub fn apply_defaults(&mut self) {
        for field in self.fields {
            field.write_default(&mut self.record);
        }
    }

    /// Return to defaults and wipe the stored record
    ///
    /// Any pending save is dropped. The erase itself runs on the next
    /// [`persist`](Self::persist) call, so the caller never blocks on flash.
    pub fn factory_reset(&mut self) {
        self.apply_defaults();
        self.saves.cancel();
        self.erase_pending = true;
    }

    /// Whether a factory reset is waiting for [`persist`](Self::persist)
    pub fn erase_pending(&self) -> bool {
        self.erase_pending
    }

    /// `(name, kind, value)` for every field, in registration order
    pub fn enumerate(&self) -> impl Iterator<Item = FieldEntry> + '_ {
        self.fields.iter().map(move |field| FieldEntry {
            name: field.name(),
            kind: field.kind(),
            value: field.format(&self.record),
        })
    }

    /// Record where the current values came from
    pub fn set_origin(&mut self, path: &str) {
        self.record.set_origin(path);
    }

    /// Explicit save request; a deadline of "now" commits on the next cycle
    pub fn request_save(&mut self, deadline_ms: u64) {
        self.saves.request_save(deadline_ms);
    }

    /// Pending save deadline, if any
    pub fn pending_save(&self) -> Option<u64> {
        self.saves.pending()
    }

    /// Commit the record if the pending deadline has passed
    ///
    /// A pending factory reset erases storage first. Returns whether the
    /// medium was touched.
    pub async fn persist<S: ConfigStorage>(
        &mut self,
        now_ms: u64,
        storage: &mut S,
    ) -> Result<bool, PersistenceFailed> {
        let mut touched = false;
        if self.erase_pending {
            self.erase_pending = false;
            storage.erase().await.map_err(PersistenceFailed)?;
            touched = true;
        }

        let written = self.saves.tick(now_ms, &self.record, storage).await?;
        Ok(touched || written)
    }

    /// Boot-time load
    ///
    /// Any storage failure falls back to defaults; boot never fails here.
    /// A decoded record still goes through every field's limits, and
    /// fields outside them take their default.
    pub async fn load<S: ConfigStorage>(&mut self, storage: &mut S) -> LoadOutcome {
        match storage.load().await {
            Ok(mut record) => {
                record.set_origin(self.record.origin());

                let mut repaired = 0u8;
                for field in self.fields {
                    if field.is_valid(&record) {
                        continue;
                    }
                    #[cfg(feature = "defmt")]
                    defmt::warn!("config field {} out of range, reset", field.name());
                    field.write_default(&mut record);
                    repaired = repaired.saturating_add(1);
                }
                self.record = record;

                if repaired > 0 {
                    LoadOutcome::Repaired(repaired)
                } else {
                    #[cfg(feature = "defmt")]
                    defmt::info!("config loaded");
                    LoadOutcome::Loaded
                }
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("config load failed ({}), using defaults", e);
                self.apply_defaults();
                LoadOutcome::Defaulted(e)
            }
        }
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

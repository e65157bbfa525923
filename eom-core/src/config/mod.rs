//! Configuration registry
//!
//! A single [`ConfigRecord`] holds every runtime setting. It is reached
//! only through [`ConfigRegistry`], which looks fields up by name in the
//! static [`FIELDS`] table and schedules a save on every successful write.
//! The record is stored in flash as a postcard blob (see [`stored`]).

pub mod field;
pub mod fields;
pub mod record;
pub mod registry;
pub mod stored;

pub use field::{ConfigField, FieldKind, FieldText, Slot};
pub use fields::{FIELDS, FIELD_COUNT};
pub use record::{ConfigRecord, ConfigString, VibrationMode};
pub use registry::{ConfigRegistry, FieldEntry, LoadOutcome, SetOutcome};
pub use stored::{decode_record, encode_record, CodecError};

/// Errors from registry lookups and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No field is registered under that name
    UnknownField,
    /// Value failed to parse, exceeds its length, or violates its bounds
    ValueOutOfRange,
}

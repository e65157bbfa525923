//! Typed field descriptors
//!
//! A [`ConfigField`] binds a unique name to one slot of the
//! [`ConfigRecord`] through plain accessor functions, so lookups by name
//! never need string-generated code and the table can live in a `static`.

use core::fmt::Write;

use heapless::String;

use super::record::{ConfigRecord, ConfigString, CONFIG_STRING_CAPACITY};
use super::ConfigError;

/// Capacity of a field value rendered as text
pub const FIELD_TEXT_CAPACITY: usize = CONFIG_STRING_CAPACITY;

/// A field value rendered as text
pub type FieldText = String<FIELD_TEXT_CAPACITY>;

/// The kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    String,
    Boolean,
    Integer,
    Enum,
}

/// Storage slot binding for a field, tagged by kind
#[derive(Clone, Copy)]
pub enum Slot {
    Text {
        max_len: usize,
        default: &'static str,
        read: fn(&ConfigRecord) -> &ConfigString,
        write: fn(&mut ConfigRecord) -> &mut ConfigString,
    },
    Flag {
        default: bool,
        read: fn(&ConfigRecord) -> bool,
        write: fn(&mut ConfigRecord, bool),
    },
    Number {
        min: i32,
        max: i32,
        default: i32,
        read: fn(&ConfigRecord) -> i32,
        write: fn(&mut ConfigRecord, i32),
    },
    Choice {
        default: i32,
        read: fn(&ConfigRecord) -> i32,
        /// Returns false if the value is not a registered variant
        write: fn(&mut ConfigRecord, i32) -> bool,
    },
}

/// Descriptor for one named configuration field
#[derive(Clone, Copy)]
pub struct ConfigField {
    name: &'static str,
    slot: Slot,
    reboot_required: bool,
}

impl ConfigField {
    /// String field limited to `max_len` bytes
    pub const fn text(
        name: &'static str,
        max_len: usize,
        default: &'static str,
        read: fn(&ConfigRecord) -> &ConfigString,
        write: fn(&mut ConfigRecord) -> &mut ConfigString,
    ) -> Self {
        Self {
            name,
            slot: Slot::Text {
                max_len,
                default,
                read,
                write,
            },
            reboot_required: false,
        }
    }

    /// Boolean field
    pub const fn flag(
        name: &'static str,
        default: bool,
        read: fn(&ConfigRecord) -> bool,
        write: fn(&mut ConfigRecord, bool),
    ) -> Self {
        Self {
            name,
            slot: Slot::Flag {
                default,
                read,
                write,
            },
            reboot_required: false,
        }
    }

    /// Integer field bounded to `min..=max`
    pub const fn number(
        name: &'static str,
        min: i32,
        max: i32,
        default: i32,
        read: fn(&ConfigRecord) -> i32,
        write: fn(&mut ConfigRecord, i32),
    ) -> Self {
        Self {
            name,
            slot: Slot::Number {
                min,
                max,
                default,
                read,
                write,
            },
            reboot_required: false,
        }
    }

    /// Enum field stored by discriminant
    pub const fn choice(
        name: &'static str,
        default: i32,
        read: fn(&ConfigRecord) -> i32,
        write: fn(&mut ConfigRecord, i32) -> bool,
    ) -> Self {
        Self {
            name,
            slot: Slot::Choice {
                default,
                read,
                write,
            },
            reboot_required: false,
        }
    }

    /// Mark this field as taking effect only after a reboot
    pub const fn needs_reboot(self) -> Self {
        Self {
            reboot_required: true,
            ..self
        }
    }

    /// Unique field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Kind of value this field holds
    pub fn kind(&self) -> FieldKind {
        match self.slot {
            Slot::Text { .. } => FieldKind::String,
            Slot::Flag { .. } => FieldKind::Boolean,
            Slot::Number { .. } => FieldKind::Integer,
            Slot::Choice { .. } => FieldKind::Enum,
        }
    }

    /// Slot binding
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Whether a new value only takes effect after a reboot
    pub fn reboot_required(&self) -> bool {
        self.reboot_required
    }

    /// Maximum length in bytes (string fields only)
    pub fn max_length(&self) -> Option<usize> {
        match self.slot {
            Slot::Text { max_len, .. } => Some(max_len),
            _ => None,
        }
    }

    /// Inclusive bounds (integer fields only)
    pub fn bounds(&self) -> Option<(i32, i32)> {
        match self.slot {
            Slot::Number { min, max, .. } => Some((min, max)),
            _ => None,
        }
    }

    /// Write this field's default into its slot
    pub fn write_default(&self, record: &mut ConfigRecord) {
        match self.slot {
            Slot::Text { default, write, .. } => {
                let slot = write(record);
                slot.clear();
                let _ = slot.push_str(default);
            }
            Slot::Flag { default, write, .. } => write(record, default),
            Slot::Number { default, write, .. } => write(record, default),
            Slot::Choice { default, write, .. } => {
                let _ = write(record, default);
            }
        }
    }

    /// Whether the slot holds a value `parse_into` would have accepted
    pub fn is_valid(&self, record: &ConfigRecord) -> bool {
        match self.slot {
            Slot::Text { max_len, read, .. } => read(record).len() <= max_len,
            Slot::Number { min, max, read, .. } => (min..=max).contains(&read(record)),
            Slot::Flag { .. } | Slot::Choice { .. } => true,
        }
    }

    /// Render the current slot value as text
    ///
    /// Integers and enums are plain decimal, booleans are `true`/`false`.
    pub fn format(&self, record: &ConfigRecord) -> FieldText {
        let mut text = FieldText::new();
        match self.slot {
            Slot::Text { read, .. } => {
                let _ = text.push_str(read(record).as_str());
            }
            Slot::Flag { read, .. } => {
                let _ = text.push_str(if read(record) { "true" } else { "false" });
            }
            Slot::Number { read, .. } | Slot::Choice { read, .. } => {
                let _ = write!(text, "{}", read(record));
            }
        }
        text
    }

    /// Parse `value` and write it into the slot
    ///
    /// On error the slot keeps its previous value. Returns whether the
    /// stored value changed.
    pub fn parse_into(&self, record: &mut ConfigRecord, value: &str) -> Result<bool, ConfigError> {
        match self.slot {
            Slot::Text {
                max_len,
                read,
                write,
                ..
            } => {
                if value.len() > max_len {
                    return Err(ConfigError::ValueOutOfRange);
                }
                if read(record).as_str() == value {
                    return Ok(false);
                }
                let mut next = ConfigString::new();
                next.push_str(value)
                    .map_err(|_| ConfigError::ValueOutOfRange)?;
                *write(record) = next;
                Ok(true)
            }
            Slot::Flag { read, write, .. } => {
                let next = parse_bool(value).ok_or(ConfigError::ValueOutOfRange)?;
                let changed = read(record) != next;
                write(record, next);
                Ok(changed)
            }
            Slot::Number {
                min,
                max,
                read,
                write,
                ..
            } => {
                let next = parse_int(value)?;
                if next < min || next > max {
                    return Err(ConfigError::ValueOutOfRange);
                }
                let changed = read(record) != next;
                write(record, next);
                Ok(changed)
            }
            Slot::Choice { read, write, .. } => {
                let next = parse_int(value)?;
                let changed = read(record) != next;
                if !write(record, next) {
                    return Err(ConfigError::ValueOutOfRange);
                }
                Ok(changed)
            }
        }
    }
}

impl core::fmt::Debug for ConfigField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConfigField")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("reboot_required", &self.reboot_required)
            .finish()
    }
}

fn parse_int(value: &str) -> Result<i32, ConfigError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ConfigError::ValueOutOfRange)
}

fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    let is = |token: &str| value.eq_ignore_ascii_case(token);

    if is("true") || is("1") || is("on") || is("yes") {
        Some(true)
    } else if is("false") || is("0") || is("off") || is("no") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PORT: ConfigField = ConfigField::number(
        "websocket_port",
        1,
        65535,
        80,
        |c| c.websocket_port as i32,
        |c, v| c.websocket_port = v as u16,
    );

    const HOSTNAME: ConfigField =
        ConfigField::text("hostname", 8, "eom3k", |c| &c.hostname, |c| &mut c.hostname);

    #[test]
    fn test_parse_bool_tokens() {
        for token in ["true", "TRUE", "1", "on", "Yes", " true "] {
            assert_eq!(parse_bool(token), Some(true), "{token}");
        }
        for token in ["false", "0", "OFF", "no"] {
            assert_eq!(parse_bool(token), Some(false), "{token}");
        }
        assert_eq!(parse_bool("maybe"), None);
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_number_bounds() {
        let mut record = ConfigRecord::default();

        assert_eq!(PORT.parse_into(&mut record, "8080"), Ok(true));
        assert_eq!(record.websocket_port, 8080);

        assert_eq!(
            PORT.parse_into(&mut record, "0"),
            Err(ConfigError::ValueOutOfRange)
        );
        assert_eq!(
            PORT.parse_into(&mut record, "70000"),
            Err(ConfigError::ValueOutOfRange)
        );
        assert_eq!(
            PORT.parse_into(&mut record, "eighty"),
            Err(ConfigError::ValueOutOfRange)
        );
        assert_eq!(record.websocket_port, 8080);
    }

    #[test]
    fn test_number_unchanged_reports_not_applied() {
        let mut record = ConfigRecord::default();
        PORT.write_default(&mut record);
        assert_eq!(PORT.parse_into(&mut record, " 80 "), Ok(false));
    }

    #[test]
    fn test_text_max_length() {
        let mut record = ConfigRecord::default();

        assert_eq!(HOSTNAME.parse_into(&mut record, "abcdefgh"), Ok(true));
        assert_eq!(
            HOSTNAME.parse_into(&mut record, "abcdefghi"),
            Err(ConfigError::ValueOutOfRange)
        );
        assert_eq!(HOSTNAME.format(&record).as_str(), "abcdefgh");
    }

    #[test]
    fn test_needs_reboot() {
        assert!(!HOSTNAME.reboot_required());
        assert!(HOSTNAME.needs_reboot().reboot_required());
        assert_eq!(HOSTNAME.needs_reboot().kind(), FieldKind::String);
    }

    #[test]
    fn test_descriptor_metadata() {
        assert_eq!(PORT.kind(), FieldKind::Integer);
        assert_eq!(PORT.bounds(), Some((1, 65535)));
        assert_eq!(PORT.max_length(), None);
        assert_eq!(HOSTNAME.max_length(), Some(8));
        assert_eq!(HOSTNAME.bounds(), None);
    }

    #[test]
    fn test_is_valid_checks_limits() {
        let mut record = ConfigRecord::default();
        assert!(PORT.is_valid(&record));
        assert!(HOSTNAME.is_valid(&record));

        record.websocket_port = 0;
        assert!(!PORT.is_valid(&record));

        record.hostname.clear();
        record.hostname.push_str("much-too-long").unwrap();
        assert!(!HOSTNAME.is_valid(&record));
    }
}

//! Stored configuration envelope
//!
//! The record is written as one postcard blob wrapped in a small header
//! and a CRC trailer:
//!
//! ```text
//! ┌───────────┬─────────┬──────────────────────┬───────────┐
//! │ MAGIC     │ VERSION │ postcard(record)     │ CRC32     │
//! │ 4B LE     │ 1B      │ variable             │ 4B LE     │
//! └───────────┴─────────┴──────────────────────┴───────────┘
//! ```
//!
//! The CRC covers every byte before it.

use super::record::ConfigRecord;
use crate::traits::StorageError;

/// Magic number for a stored record ("EOMC")
pub const STORED_MAGIC: u32 = 0x454F_4D43;

/// Envelope format version
pub const STORED_VERSION: u8 = 1;

const HEADER_LEN: usize = 5;
const CRC_LEN: usize = 4;

/// Smallest possible envelope
pub const MIN_STORED_LEN: usize = HEADER_LEN + CRC_LEN;

/// Errors from encoding or decoding the envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Output buffer cannot hold the envelope
    BufferTooSmall,
    /// postcard failed to serialize the record
    Serialize,
    /// postcard failed to deserialize the payload
    Deserialize,
    /// Wrong magic number
    BadMagic,
    /// Stored with a different envelope version
    VersionMismatch,
    /// Trailer does not match the content
    CrcMismatch,
}

impl From<CodecError> for StorageError {
    fn from(_: CodecError) -> Self {
        StorageError::Corrupt
    }
}

/// Encode `record` into `buf`, returning the number of bytes used
pub fn encode_record(record: &ConfigRecord, buf: &mut [u8]) -> Result<usize, CodecError> {
    if buf.len() < MIN_STORED_LEN {
        return Err(CodecError::BufferTooSmall);
    }

    buf[..4].copy_from_slice(&STORED_MAGIC.to_le_bytes());
    buf[4] = STORED_VERSION;

    let payload_room = buf.len() - CRC_LEN;
    let payload_len = postcard::to_slice(record, &mut buf[HEADER_LEN..payload_room])
        .map_err(|e| match e {
            postcard::Error::SerializeBufferFull => CodecError::BufferTooSmall,
            _ => CodecError::Serialize,
        })?
        .len();

    let body_end = HEADER_LEN + payload_len;
    let crc = crc32(&buf[..body_end]);
    buf[body_end..body_end + CRC_LEN].copy_from_slice(&crc.to_le_bytes());

    Ok(body_end + CRC_LEN)
}

/// Validate and decode an envelope
///
/// Checks run in order: length, magic, version, CRC, payload.
pub fn decode_record(data: &[u8]) -> Result<ConfigRecord, CodecError> {
    if data.len() < MIN_STORED_LEN {
        return Err(CodecError::BufferTooSmall);
    }

    let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    if magic != STORED_MAGIC {
        return Err(CodecError::BadMagic);
    }
    if data[4] != STORED_VERSION {
        return Err(CodecError::VersionMismatch);
    }

    let body_end = data.len() - CRC_LEN;
    let stored_crc = u32::from_le_bytes([
        data[body_end],
        data[body_end + 1],
        data[body_end + 2],
        data[body_end + 3],
    ]);
    if stored_crc != crc32(&data[..body_end]) {
        return Err(CodecError::CrcMismatch);
    }

    postcard::from_bytes(&data[HEADER_LEN..body_end]).map_err(|_| CodecError::Deserialize)
}

fn crc32(data: &[u8]) -> u32 {
    !crc32_update(0xFFFF_FFFF, data)
}

/// CRC32 update (IEEE 802.3 polynomial, reflected)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::record::VibrationMode;

    const BUF: usize = 2048;

    fn sample() -> ConfigRecord {
        let mut record = ConfigRecord::default();
        record.hostname.clear();
        record.hostname.push_str("bench-unit").unwrap();
        record.led_brightness = 42;
        record.vibration_mode = VibrationMode::Enhancement;
        record
    }

    #[test]
    fn test_crc32_check_value() {
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_encode_decode() {
        let mut buf = [0u8; BUF];
        let len = encode_record(&sample(), &mut buf).unwrap();
        assert_eq!(&buf[..4], &STORED_MAGIC.to_le_bytes());
        assert_eq!(buf[4], STORED_VERSION);
        assert_eq!(decode_record(&buf[..len]).unwrap(), sample());
    }

    #[test]
    fn test_origin_not_stored() {
        let mut record = sample();
        record.set_origin("/config.json");

        let mut buf = [0u8; BUF];
        let len = encode_record(&record, &mut buf).unwrap();
        assert_eq!(decode_record(&buf[..len]).unwrap().origin(), "");
    }

    #[test]
    fn test_detects_bit_flip() {
        let mut buf = [0u8; BUF];
        let len = encode_record(&sample(), &mut buf).unwrap();
        buf[HEADER_LEN + 3] ^= 0x01;
        assert_eq!(decode_record(&buf[..len]), Err(CodecError::CrcMismatch));
    }

    #[test]
    fn test_rejects_header() {
        let mut buf = [0u8; BUF];
        let len = encode_record(&sample(), &mut buf).unwrap();

        let mut bad_magic = buf;
        bad_magic[0] ^= 0xFF;
        assert_eq!(decode_record(&bad_magic[..len]), Err(CodecError::BadMagic));

        let mut bad_version = buf;
        bad_version[4] = STORED_VERSION + 1;
        assert_eq!(
            decode_record(&bad_version[..len]),
            Err(CodecError::VersionMismatch)
        );

        assert_eq!(decode_record(&buf[..3]), Err(CodecError::BufferTooSmall));
    }

    #[test]
    fn test_small_buffer() {
        let mut buf = [0u8; 16];
        assert_eq!(
            encode_record(&sample(), &mut buf),
            Err(CodecError::BufferTooSmall)
        );
    }

    #[test]
    fn test_codec_error_is_corrupt() {
        assert_eq!(
            StorageError::from(CodecError::CrcMismatch),
            StorageError::Corrupt
        );
    }
}

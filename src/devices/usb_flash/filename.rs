//! 8.3 filename codec
//!
//! The chip stores the filename as a fixed 11-byte directory-entry style
//! record: an 8-byte space-padded name field followed by a 3-byte extension
//! field. The host-side string form is `NAME.EXT` with 1-8 name characters
//! and exactly 3 extension characters.

use super::FlashError;
use heapless::{String, Vec};

/// Length of the on-wire filename record
pub const RECORD_LEN: usize = 11;

/// Shortest acceptable filename string ("A.TXT")
pub const MIN_FILENAME_LEN: usize = 5;

/// Longest acceptable filename string ("ABCDEFGH.EXT")
pub const MAX_FILENAME_LEN: usize = 12;

/// Width of the name field inside the record
const NAME_FIELD_LEN: usize = 8;

/// Width of the extension field inside the record
const EXT_LEN: usize = 3;

fn is_valid_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_'
}

/// Check a filename string for canonical 8.3 form
///
/// Valid iff the length is within [5, 12], there is exactly one `.` and it
/// sits exactly 4 characters from the end (fixed 3-character extension), and
/// every other character is alphanumeric, `-` or `_`.
pub fn validate(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.len() < MIN_FILENAME_LEN || bytes.len() > MAX_FILENAME_LEN {
        return false;
    }

    let mut dots = 0;
    for &byte in bytes {
        if byte == b'.' {
            dots += 1;
        } else if !is_valid_char(byte) {
            return false;
        }
    }

    dots == 1 && bytes[bytes.len() - (EXT_LEN + 1)] == b'.'
}

/// Encode a filename into the 11-byte wire record
///
/// The name field is left-justified and space-padded; the extension is
/// copied verbatim since it is fixed length on the wire.
///
/// # Errors
///
/// Returns `FlashError::InvalidParameter` if [`validate`] rejects the name.
pub fn try_encode(name: &str) -> Result<[u8; RECORD_LEN], FlashError> {
    if !validate(name) {
        return Err(FlashError::InvalidParameter);
    }

    let bytes = name.as_bytes();
    let base = &bytes[..bytes.len() - (EXT_LEN + 1)];
    let ext = &bytes[bytes.len() - EXT_LEN..];

    let mut record = [b' '; RECORD_LEN];
    record[..base.len()].copy_from_slice(base);
    record[NAME_FIELD_LEN..].copy_from_slice(ext);
    Ok(record)
}

/// Decode an 11-byte wire record back into `NAME.EXT` form
///
/// Trailing spaces are trimmed from the name field; the extension is taken
/// verbatim. Inverse of [`try_encode`] for every valid name.
///
/// # Errors
///
/// Returns `FlashError::InvalidParameter` if the record is shorter than 11
/// bytes or does not hold text.
pub fn decode(record: &[u8]) -> Result<String<MAX_FILENAME_LEN>, FlashError> {
    if record.len() < RECORD_LEN {
        return Err(FlashError::InvalidParameter);
    }

    let base_len = record[..NAME_FIELD_LEN]
        .iter()
        .rposition(|&byte| byte != b' ')
        .map_or(0, |i| i + 1);

    let mut bytes: Vec<u8, MAX_FILENAME_LEN> = Vec::new();
    // base (<= 8) + '.' + extension (3) always fits in 12
    let _ = bytes.extend_from_slice(&record[..base_len]);
    let _ = bytes.push(b'.');
    let _ = bytes.extend_from_slice(&record[NAME_FIELD_LEN..RECORD_LEN]);

    String::from_utf8(bytes).map_err(|_| FlashError::InvalidParameter)
}

//! Utility functions for binary parsing and string conversion.

use crate::error::{RegistryError, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::{UTF_16LE, WINDOWS_1252};
use std::io::Cursor;

/// Offset where hive bins start (after base block)
pub const HBIN_START_OFFSET: u32 = 0x1000;

/// Reads an ASCII string from a byte slice, trimming null terminators.
///
/// Registry strings are often null-terminated, so we trim trailing nulls.
/// Uses lossy conversion to handle any invalid UTF-8 bytes gracefully.
pub fn read_ascii_string(data: &[u8]) -> String {
    String::from_utf8_lossy(data)
        .trim_end_matches('\0')
        .to_string()
}

/// Decodes a byte slice as Windows-1252, trimming trailing nulls.
///
/// Compressed (ASCII-flagged) key and value names are not guaranteed to be
/// pure ASCII in practice; Windows-1252 is the superset Windows itself uses
/// for "ANSI" strings, so it decodes every byte rather than replacing the
/// high half with U+FFFD.
pub fn read_windows1252_string(data: &[u8]) -> String {
    let (decoded, _encoding, _had_errors) = WINDOWS_1252.decode(data);
    decoded.trim_end_matches('\0').to_string()
}

/// Reads a UTF-16LE string from a byte slice, trimming null terminators.
///
/// Registry strings are typically null-terminated. This function decodes
/// UTF-16LE data and removes trailing null characters.
///
/// # Errors
///
/// Returns an error if the data length is not even (UTF-16 requires 2-byte units)
/// or if the UTF-16 decoding fails.
pub fn read_utf16_string(data: &[u8], offset: u32) -> Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }

    // UTF-16 requires even number of bytes
    if data.len() % 2 != 0 {
        return Err(RegistryError::InvalidUtf16 { offset });
    }

    let (decoded, _encoding, had_errors) = UTF_16LE.decode(data);

    if had_errors {
        return Err(RegistryError::InvalidUtf16 { offset });
    }

    // Trim null terminators (common in registry strings)
    Ok(decoded.trim_end_matches('\0').to_string())
}

/// Reads a UTF-16LE string from a byte slice without trimming a NUL
/// terminator or stopping at one.
///
/// Used when a caller has asked to over-read past a value's declared
/// length (`RegistryValue::decode` with `overrun > 0`): the declared
/// length may undercount, so the trailing NUL the ordinary decode trims
/// might not actually be there, and any embedded NUL is data, not an
/// end marker.
///
/// # Errors
///
/// Returns an error if the data length is not even, or if the UTF-16
/// decoding fails.
pub fn read_utf16_string_raw(data: &[u8], offset: u32) -> Result<String> {
    if data.is_empty() {
        return Ok(String::new());
    }

    if data.len() % 2 != 0 {
        return Err(RegistryError::InvalidUtf16 { offset });
    }

    let (decoded, _encoding, had_errors) = UTF_16LE.decode(data);

    if had_errors {
        return Err(RegistryError::InvalidUtf16 { offset });
    }

    Ok(decoded.into_owned())
}

/// Splits a UTF-16LE blob on NUL code units and decodes each run.
///
/// Used for `REG_MULTI_SZ` and `RegUnicodeStringArray`: unlike
/// [`read_utf16_string`], the split happens on raw 16-bit code units before
/// decoding, so a surrogate pair is never torn apart by a NUL byte that
/// happens to land inside it.
pub fn read_utf16_multi_string(data: &[u8], offset: u32) -> Result<Vec<String>> {
    if data.len() % 2 != 0 {
        return Err(RegistryError::InvalidUtf16 { offset });
    }

    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    let mut strings = Vec::new();
    let mut run_start = 0;
    for (i, &unit) in units.iter().enumerate() {
        if unit == 0 {
            if i > run_start {
                strings.push(decode_utf16_units(&units[run_start..i], offset)?);
            }
            run_start = i + 1;
        }
    }
    if run_start < units.len() {
        strings.push(decode_utf16_units(&units[run_start..], offset)?);
    }

    Ok(strings)
}

fn decode_utf16_units(units: &[u16], offset: u32) -> Result<String> {
    String::from_utf16(units).map_err(|_| RegistryError::InvalidUtf16 { offset })
}

/// Reads a fixed-length ASCII string (not null-terminated).
pub fn read_fixed_ascii(data: &[u8], len: usize) -> String {
    data.iter()
        .take(len)
        .map(|&b| if b == 0 { ' ' } else { b as char })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Reads a u8 from a byte slice at the given offset.
pub fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset).copied().ok_or_else(|| RegistryError::TruncatedData {
        offset: offset as u32,
        expected: 1,
        actual: data.len().saturating_sub(offset),
    })
}

/// Reads a u32 from a byte slice at the given offset.
pub fn read_u32_le(data: &[u8], offset: usize) -> Result<u32> {
    if offset + 4 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 4,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 4]);
    Ok(cursor.read_u32::<LittleEndian>()?)
}

/// Reads a u16 from a byte slice at the given offset.
pub fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    if offset + 2 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 2,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 2]);
    Ok(cursor.read_u16::<LittleEndian>()?)
}

/// Reads an i16 from a byte slice at the given offset.
pub fn read_i16_le(data: &[u8], offset: usize) -> Result<i16> {
    if offset + 2 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 2,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 2]);
    Ok(cursor.read_i16::<LittleEndian>()?)
}

/// Reads an i32 from a byte slice at the given offset.
pub fn read_i32_le(data: &[u8], offset: usize) -> Result<i32> {
    if offset + 4 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 4,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 4]);
    Ok(cursor.read_i32::<LittleEndian>()?)
}

/// Reads a u64 from a byte slice at the given offset.
pub fn read_u64_le(data: &[u8], offset: usize) -> Result<u64> {
    if offset + 8 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 8,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 8]);
    Ok(cursor.read_u64::<LittleEndian>()?)
}

/// Reads an i64 from a byte slice at the given offset.
pub fn read_i64_le(data: &[u8], offset: usize) -> Result<i64> {
    if offset + 8 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 8,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 8]);
    Ok(cursor.read_i64::<LittleEndian>()?)
}

/// Reads an f32 from a byte slice at the given offset.
pub fn read_f32_le(data: &[u8], offset: usize) -> Result<f32> {
    if offset + 4 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 4,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 4]);
    Ok(cursor.read_f32::<LittleEndian>()?)
}

/// Reads an f64 from a byte slice at the given offset.
pub fn read_f64_le(data: &[u8], offset: usize) -> Result<f64> {
    if offset + 8 > data.len() {
        return Err(RegistryError::TruncatedData {
            offset: offset as u32,
            expected: 8,
            actual: data.len().saturating_sub(offset),
        });
    }

    let mut cursor = Cursor::new(&data[offset..offset + 8]);
    Ok(cursor.read_f64::<LittleEndian>()?)
}

/// Calculates XOR checksum for the first 508 bytes of the base block.
pub fn calculate_checksum(data: &[u8]) -> u32 {
    let mut checksum: u32 = 0;

    // XOR all DWORDs except the checksum field itself (at offset 0x1FC)
    for i in (0..0x1FC).step_by(4) {
        if i + 4 <= data.len() {
            if let Ok(dword) = read_u32_le(data, i) {
                checksum ^= dword;
            }
        }
    }

    checksum
}

/// Converts a relative cell offset to an absolute hive offset.
///
/// Cell offsets in the registry are relative to the first hbin (at 0x1000).
/// This function adds 0x1000 to convert to an absolute offset.
///
/// # Arguments
///
/// * `cell_offset` - Cell offset relative to first hbin
///
/// # Returns
///
/// Returns the absolute offset, or an error if the addition would overflow.
///
/// # Errors
///
/// Returns `RegistryError::InvalidOffset` if the offset would overflow.
#[inline]
pub fn cell_offset_to_absolute(cell_offset: u32) -> Result<u32> {
    cell_offset
        .checked_add(HBIN_START_OFFSET)
        .ok_or_else(|| RegistryError::InvalidOffset {
            offset: cell_offset,
            hive_size: 0,  // Not known at this point
        })
}

/// Converts an absolute hive offset to a relative cell offset.
///
/// # Arguments
///
/// * `absolute_offset` - Absolute offset from start of hive
///
/// # Returns
///
/// Returns the cell offset relative to first hbin, or an error if the
/// absolute offset is before the hbin start.
///
/// # Errors
///
/// Returns `RegistryError::InvalidFormat` if the offset is before hbin start.
#[inline]
pub fn absolute_to_cell_offset(absolute_offset: u32) -> Result<u32> {
    if absolute_offset < HBIN_START_OFFSET {
        return Err(RegistryError::InvalidFormat(
            format!("Absolute offset {:#x} is before hbin start", absolute_offset)
        ));
    }
    Ok(absolute_offset - HBIN_START_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_ascii_string() {
        let data = b"Hello";
        assert_eq!(read_ascii_string(data), "Hello");

        // Should trim trailing nulls
        let data_with_null = b"Hello\0\0";
        assert_eq!(read_ascii_string(data_with_null), "Hello");
    }

    #[test]
    fn test_read_ascii_string_with_embedded_null() {
        // Embedded nulls are preserved, only trailing ones are trimmed
        let data = b"Hello\0World\0\0";
        assert_eq!(read_ascii_string(data), "Hello\0World");
    }

    #[test]
    fn test_read_windows1252_string() {
        // 0x93/0x94 are curly quotes in Windows-1252, invalid as UTF-8 leads.
        let data = [0x93, b'h', b'i', 0x94, 0x00];
        let s = read_windows1252_string(&data);
        assert!(s.ends_with("hi\u{201D}"));
    }

    #[test]
    fn test_read_utf16_string_raw_keeps_trailing_nul() {
        let mut data: Vec<u8> = "hi".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        data.extend_from_slice(&0u16.to_le_bytes());
        let s = read_utf16_string_raw(&data, 0).unwrap();
        assert_eq!(s, "hi\0");
    }

    #[test]
    fn test_read_utf16_multi_string() {
        let mut data = Vec::new();
        for ch in "one".encode_utf16() {
            data.extend_from_slice(&ch.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
        for ch in "two".encode_utf16() {
            data.extend_from_slice(&ch.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());

        let strings = read_utf16_multi_string(&data, 0).unwrap();
        assert_eq!(strings, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_read_fixed_ascii() {
        let data = b"Test    ";
        assert_eq!(read_fixed_ascii(data, 8), "Test");
    }

    #[test]
    fn test_offset_conversion() {
        assert_eq!(cell_offset_to_absolute(0).unwrap(), 0x1000);
        assert_eq!(cell_offset_to_absolute(0x20).unwrap(), 0x1020);
        assert_eq!(cell_offset_to_absolute(0x1000).unwrap(), 0x2000);

        assert_eq!(absolute_to_cell_offset(0x1000).unwrap(), 0);
        assert_eq!(absolute_to_cell_offset(0x1020).unwrap(), 0x20);
        assert_eq!(absolute_to_cell_offset(0x2000).unwrap(), 0x1000);
    }

    #[test]
    fn test_offset_overflow() {
        // Test overflow protection
        let result = cell_offset_to_absolute(u32::MAX);
        assert!(result.is_err());

        let result = cell_offset_to_absolute(u32::MAX - HBIN_START_OFFSET + 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_offset_underflow() {
        // Test underflow protection
        let result = absolute_to_cell_offset(0);
        assert!(result.is_err());

        let result = absolute_to_cell_offset(0xFFF);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_u32_le() {
        let data = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(read_u32_le(&data, 0).unwrap(), 0x04030201);
    }

    #[test]
    fn test_read_u64_le() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(read_u64_le(&data, 0).unwrap(), 0x0807060504030201);
    }
}

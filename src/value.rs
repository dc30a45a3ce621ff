//! Registry value (vk) parsing and data extraction.
//!
//! Beyond the classic `REG_*` types, this module decodes the extended
//! settings.dat value types (0x101-0x11F): self-describing scalars, arrays,
//! GUIDs, and composite streams used by newer app-data hives.

use crate::cell::ValueType;
use crate::error::{RegistryError, Result};
use crate::utils::{
    read_f32_le, read_f64_le, read_i16_le, read_i32_le, read_i64_le, read_u16_le, read_u32_le,
    read_u64_le, read_u8, read_utf16_multi_string, read_utf16_string, read_utf16_string_raw,
    read_windows1252_string,
};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use chrono::{DateTime, Duration, Utc};
use std::io::Cursor;
use uuid::Uuid;

/// Mask applied to the raw `data_type` dword; the upper bits are reserved.
const DATA_TYPE_MASK: u32 = 0x0FFF;

/// Ticks (100ns units) between the .NET epoch (0001-01-01) and the Unix epoch.
const DOTNET_TICKS_TO_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// Value key (vk) structure.
///
/// Represents a registry value with its name, type, and data.
#[derive(Debug, Clone)]
pub struct ValueKey {
    /// Length of value name.
    pub name_length: u16,

    /// Raw data-length dword as stored on disk: bit 31 set means the data is
    /// stored inline in `data_offset` rather than at a separate cell.
    data_length_raw: u32,

    /// Offset to value data (or inline data if `is_inline_data()`).
    pub data_offset: u32,

    /// Value data type.
    pub data_type: ValueType,

    /// Flags (0x0001 = name is ASCII).
    pub flags: u16,

    /// Value name.
    pub name: String,
}

impl ValueKey {
    /// Parses a value key from cell data.
    ///
    /// # Arguments
    ///
    /// * `data` - Cell data (excluding size field, starting with "vk" signature).
    /// * `offset` - Offset of this cell for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is malformed or truncated.
    pub fn parse(data: &[u8], offset: u32) -> Result<Self> {
        if data.len() < 20 {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: 20,
                actual: data.len(),
            });
        }

        // Verify signature
        if &data[0..2] != b"vk" {
            return Err(RegistryError::InvalidFormat(format!(
                "Expected 'vk' signature at offset {:#x}",
                offset
            )));
        }

        let name_length = read_u16_le(data, 0x02)?;

        // data_length's high bit flags inline storage; the low 31 bits are
        // kept verbatim here and interpreted by `is_inline_data`/`inline_len`.
        let data_length_raw = read_u32_le(data, 0x04)?;

        let data_offset = read_u32_le(data, 0x08)?;
        let data_type_raw = read_u32_le(data, 0x0C)? & DATA_TYPE_MASK;
        let data_type = ValueType::from_u32(data_type_raw)?;
        let flags = read_u16_le(data, 0x10)?;

        // Spare field at 0x12 (2 bytes) - unused

        // Value name starts at offset 0x14
        let name = if name_length > 0 {
            let name_end = 0x14 + name_length as usize;
            if name_end > data.len() {
                return Err(RegistryError::TruncatedData {
                    offset,
                    expected: name_end,
                    actual: data.len(),
                });
            }

            let name_data = &data[0x14..name_end];

            // Check if name is Windows-1252 (flag 0x0001)
            if (flags & 0x0001) != 0 {
                read_windows1252_string(name_data)
            } else {
                read_utf16_string(name_data, offset)?
            }
        } else {
            // Default value (unnamed) - the base parser's own convention
            String::from("(default)")
        };

        Ok(ValueKey {
            name_length,
            data_length_raw,
            data_offset,
            data_type,
            flags,
            name,
        })
    }

    /// Returns the declared data length: the low 31 bits of the raw dword,
    /// regardless of whether the high bit marks the data as inline.
    pub fn data_length(&self) -> u32 {
        self.data_length_raw & 0x7FFF_FFFF
    }

    /// Returns true if the data is stored inline in `data_offset` rather than
    /// at a separate cell, per the explicit high bit of the raw length dword.
    pub fn is_inline_data(&self) -> bool {
        (self.data_length_raw & 0x8000_0000) != 0
    }

    /// Extracts inline data: the low 31 bits of `data_length`, capped at 4,
    /// taken from the little-endian bytes of `data_offset` itself.
    pub fn inline_data(&self) -> Vec<u8> {
        let len = self.data_length().min(4) as usize;
        let bytes = self.data_offset.to_le_bytes();
        bytes[..len].to_vec()
    }
}

/// One item of a `RegCompositeValue` stream: a name paired with its own
/// self-describing value.
#[derive(Debug, Clone)]
pub struct CompositeItem {
    /// Item name.
    pub name: String,
    /// Decoded item value.
    pub value: Box<ValueData>,
}

/// Parsed registry value data.
#[derive(Debug, Clone)]
pub enum ValueData {
    /// No data.
    None,

    /// String value.
    String(String),

    /// Expandable string value.
    ExpandString(String),

    /// Binary data.
    Binary(Vec<u8>),

    /// 32-bit integer.
    Dword(u32),

    /// 32-bit big-endian integer.
    DwordBigEndian(u32),

    /// Multiple strings.
    MultiString(Vec<String>),

    /// 64-bit integer.
    Qword(u64),

    /// Windows FILETIME, decoded to a UTC instant.
    FileTime(DateTime<Utc>),

    /// Unsigned 8-bit integer.
    U8(u8),
    /// Signed 16-bit integer.
    I16(i16),
    /// Unsigned 16-bit integer.
    U16(u16),
    /// Signed 32-bit integer.
    I32(i32),
    /// Unsigned 32-bit integer.
    U32(u32),
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// Single UTF-16 code unit, decoded as a one-character string.
    UnicodeChar(String),
    /// Boolean.
    Bool(bool),
    /// A GUID, rendered in canonical form.
    Guid(Uuid),
    /// A .NET `DateTimeOffset`, decoded to a UTC instant.
    DateTimeOffset(DateTime<Utc>),
    /// A .NET `TimeSpan`, decoded to a duration.
    TimeSpan(Duration),
    /// A recursively-decoded composite stream.
    Composite(Vec<CompositeItem>),

    /// Array of raw byte blobs.
    BytesArray(Vec<Vec<u8>>),
    /// Array of i16.
    I16Array(Vec<i16>),
    /// Array of u16.
    U16Array(Vec<u16>),
    /// Array of i32.
    I32Array(Vec<i32>),
    /// Array of u32.
    U32Array(Vec<u32>),
    /// Array of i64.
    I64Array(Vec<i64>),
    /// Array of u64.
    U64Array(Vec<u64>),
    /// Array of f32.
    F32Array(Vec<f32>),
    /// Array of f64.
    F64Array(Vec<f64>),
    /// Array of single UTF-16 code units, each as a one-character string.
    UnicodeCharArray(Vec<String>),
    /// Array of booleans.
    BoolArray(Vec<bool>),
    /// Array of strings.
    UnicodeStringArray(Vec<String>),

    /// A recognized-but-undocumented extended type (0x111-0x113): raw bytes.
    RawExtended(u32, Vec<u8>),

    /// Unknown or unsupported type.
    Unknown(Vec<u8>),
}

impl ValueData {
    /// Parses value data based on the value type.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw value data bytes.
    /// * `value_type` - Type of the value.
    /// * `offset` - Offset for error reporting.
    pub fn parse(data: &[u8], value_type: ValueType, offset: u32) -> Result<Self> {
        Self::parse_with_overrun(data, value_type, offset, 0)
    }

    /// Parses value data, selecting a non-terminating string decode when
    /// `overrun > 0`.
    ///
    /// A caller that asked to over-read past a value's declared length
    /// (`RegistryValue::decode`) can no longer trust that a trailing NUL
    /// marks the real end of an `SZ`/`EXPAND_SZ` string, so `overrun > 0`
    /// switches those types to the raw, non-stripping UTF-16LE decode
    /// instead of [`read_utf16_string`].
    ///
    /// # Arguments
    ///
    /// * `data` - Raw value data bytes.
    /// * `value_type` - Type of the value.
    /// * `offset` - Offset for error reporting.
    /// * `overrun` - Extra bytes the caller asked to read past the
    ///   declared length; non-zero switches string types to a raw decode.
    pub fn parse_with_overrun(data: &[u8], value_type: ValueType, offset: u32, overrun: u32) -> Result<Self> {
        if data.is_empty() && value_type != ValueType::CompositeValue {
            return Ok(ValueData::None);
        }

        // Extended types are wrapped with a trailing 8-byte timestamp that
        // plays no role in the decoded value itself.
        let data = if value_type.is_extended() && data.len() >= 8 {
            &data[..data.len() - 8]
        } else {
            data
        };

        match value_type {
            ValueType::None => Ok(ValueData::None),

            ValueType::String | ValueType::ExpandString | ValueType::Link => {
                let s = if overrun > 0 {
                    read_utf16_string_raw(data, offset)?
                } else {
                    read_utf16_string(data, offset)?
                };
                match value_type {
                    ValueType::ExpandString => Ok(ValueData::ExpandString(s)),
                    _ => Ok(ValueData::String(s)),
                }
            }

            ValueType::Binary
            | ValueType::ResourceList
            | ValueType::FullResourceDescriptor
            | ValueType::ResourceRequirementsList => Ok(ValueData::Binary(data.to_vec())),

            ValueType::Dword => {
                let mut cursor = Cursor::new(data);
                Ok(ValueData::Dword(cursor.read_u32::<LittleEndian>()?))
            }

            ValueType::DwordBigEndian => {
                let mut cursor = Cursor::new(data);
                Ok(ValueData::DwordBigEndian(cursor.read_u32::<BigEndian>()?))
            }

            ValueType::Qword => {
                let mut cursor = Cursor::new(data);
                Ok(ValueData::Qword(cursor.read_u64::<LittleEndian>()?))
            }

            ValueType::MultiString => {
                Ok(ValueData::MultiString(read_utf16_multi_string(data, offset)?))
            }

            ValueType::FileTime => {
                let ticks = read_u64_le(data, 0)?;
                Ok(ValueData::FileTime(filetime_to_datetime(ticks)))
            }

            ValueType::Uint8 => Ok(ValueData::U8(read_u8(data, 0)?)),
            ValueType::Int16 => Ok(ValueData::I16(read_i16_le(data, 0)?)),
            ValueType::Uint16 => Ok(ValueData::U16(read_u16_le(data, 0)?)),
            ValueType::Int32 => Ok(ValueData::I32(read_i32_le(data, 0)?)),
            ValueType::Uint32 => Ok(ValueData::U32(read_u32_le(data, 0)?)),
            ValueType::Int64 => Ok(ValueData::I64(read_i64_le(data, 0)?)),
            ValueType::Uint64 => Ok(ValueData::U64(read_u64_le(data, 0)?)),
            ValueType::Float => Ok(ValueData::F32(read_f32_le(data, 0)?)),
            ValueType::Double => Ok(ValueData::F64(read_f64_le(data, 0)?)),
            ValueType::Boolean => Ok(ValueData::Bool(read_u8(data, 0)? != 0)),
            ValueType::UnicodeChar => Ok(ValueData::UnicodeChar(decode_unicode_char(data, offset)?)),
            ValueType::UnicodeString => Ok(ValueData::String(read_utf16_string(data, offset)?)),
            ValueType::Guid => Ok(ValueData::Guid(decode_guid(data, offset)?)),
            ValueType::DateTimeOffset => {
                let ticks = read_i64_le(data, 0)?;
                Ok(ValueData::DateTimeOffset(dotnet_ticks_to_datetime(ticks)))
            }
            ValueType::TimeSpan => {
                let ticks = read_i64_le(data, 0)?;
                Ok(ValueData::TimeSpan(Duration::nanoseconds(ticks * 100)))
            }
            ValueType::CompositeValue => Ok(ValueData::Composite(decode_composite_stream(data, offset)?)),

            ValueType::BytesArray => Ok(ValueData::BytesArray(decode_length_prefixed_blobs(data))),
            ValueType::UnicodeStringArray => {
                Ok(ValueData::UnicodeStringArray(decode_length_prefixed_strings(data, offset)?))
            }
            ValueType::Int16Array => Ok(ValueData::I16Array(decode_fixed_array(data, 2, |d, i| read_i16_le(d, i))?)),
            ValueType::Uint16Array => Ok(ValueData::U16Array(decode_fixed_array(data, 2, |d, i| read_u16_le(d, i))?)),
            ValueType::Int32Array => Ok(ValueData::I32Array(decode_fixed_array(data, 4, |d, i| read_i32_le(d, i))?)),
            ValueType::Uint32Array => Ok(ValueData::U32Array(decode_fixed_array(data, 4, |d, i| read_u32_le(d, i))?)),
            ValueType::Int64Array => Ok(ValueData::I64Array(decode_fixed_array(data, 8, |d, i| read_i64_le(d, i))?)),
            ValueType::Uint64Array => Ok(ValueData::U64Array(decode_fixed_array(data, 8, |d, i| read_u64_le(d, i))?)),
            ValueType::FloatArray => Ok(ValueData::F32Array(decode_fixed_array(data, 4, |d, i| read_f32_le(d, i))?)),
            ValueType::DoubleArray => Ok(ValueData::F64Array(decode_fixed_array(data, 8, |d, i| read_f64_le(d, i))?)),
            ValueType::BooleanArray => {
                Ok(ValueData::BoolArray(data.iter().map(|&b| b != 0).collect()))
            }
            ValueType::UnicodeCharArray => {
                let mut chars = Vec::new();
                for chunk in data.chunks_exact(2) {
                    chars.push(decode_unicode_char(chunk, offset)?);
                }
                Ok(ValueData::UnicodeCharArray(chars))
            }

            ValueType::Unk111 | ValueType::Unk112 | ValueType::Unk113 => {
                let code = match value_type {
                    ValueType::Unk111 => 0x111,
                    ValueType::Unk112 => 0x112,
                    _ => 0x113,
                };
                tracing::warn!(type_code = code, offset, "recognized but undecoded extended value type");
                Ok(ValueData::RawExtended(code, data.to_vec()))
            }

            // For other (unrecognized) types, return raw binary data.
            ValueType::Unknown(code) => {
                tracing::warn!(type_code = code, offset, "unknown value type, falling back to raw bytes");
                Ok(ValueData::Unknown(data.to_vec()))
            }
        }
    }

    /// Converts the value data to a string representation.
    pub fn to_string(&self) -> String {
        match self {
            ValueData::None => String::from("(none)"),
            ValueData::String(s) | ValueData::ExpandString(s) => s.clone(),
            ValueData::Binary(b) => format!("{:02X?}", b),
            ValueData::Dword(d) => format!("{} (0x{:08X})", d, d),
            ValueData::DwordBigEndian(d) => format!("{} (0x{:08X})", d, d),
            ValueData::Qword(q) => format!("{} (0x{:016X})", q, q),
            ValueData::MultiString(strings) => strings.join(", "),
            ValueData::FileTime(dt) => dt.to_rfc3339(),
            ValueData::U8(v) => v.to_string(),
            ValueData::I16(v) => v.to_string(),
            ValueData::U16(v) => v.to_string(),
            ValueData::I32(v) => v.to_string(),
            ValueData::U32(v) => v.to_string(),
            ValueData::I64(v) => v.to_string(),
            ValueData::U64(v) => v.to_string(),
            ValueData::F32(v) => v.to_string(),
            ValueData::F64(v) => v.to_string(),
            ValueData::UnicodeChar(c) => c.clone(),
            ValueData::Bool(b) => b.to_string(),
            ValueData::Guid(g) => g.to_string(),
            ValueData::DateTimeOffset(dt) => dt.to_rfc3339(),
            ValueData::TimeSpan(d) => format!("{}ms", d.num_milliseconds()),
            ValueData::Composite(items) => format!("{{{} items}}", items.len()),
            ValueData::BytesArray(v) => format!("[{} blobs]", v.len()),
            ValueData::I16Array(v) => format!("{:?}", v),
            ValueData::U16Array(v) => format!("{:?}", v),
            ValueData::I32Array(v) => format!("{:?}", v),
            ValueData::U32Array(v) => format!("{:?}", v),
            ValueData::I64Array(v) => format!("{:?}", v),
            ValueData::U64Array(v) => format!("{:?}", v),
            ValueData::F32Array(v) => format!("{:?}", v),
            ValueData::F64Array(v) => format!("{:?}", v),
            ValueData::UnicodeCharArray(v) => v.join(""),
            ValueData::BoolArray(v) => format!("{:?}", v),
            ValueData::UnicodeStringArray(v) => v.join(", "),
            ValueData::RawExtended(code, b) => format!("<extended {:#05x}, {} bytes>", code, b.len()),
            ValueData::Unknown(b) => format!("{:02X?}", b),
        }
    }
}

fn filetime_to_datetime(ticks: u64) -> DateTime<Utc> {
    const FILETIME_UNIX_DIFF: i64 = 11_644_473_600;
    let seconds = (ticks / 10_000_000) as i64 - FILETIME_UNIX_DIFF;
    let nanos = ((ticks % 10_000_000) * 100) as u32;
    DateTime::from_timestamp(seconds, nanos).unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}

fn dotnet_ticks_to_datetime(ticks: i64) -> DateTime<Utc> {
    let unix_ticks = ticks - DOTNET_TICKS_TO_UNIX_EPOCH;
    let seconds = unix_ticks / 10_000_000;
    let nanos = ((unix_ticks.rem_euclid(10_000_000)) * 100) as u32;
    DateTime::from_timestamp(seconds, nanos).unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH)
}

fn decode_unicode_char(data: &[u8], offset: u32) -> Result<String> {
    let unit = read_u16_le(data, 0)?;
    // A single UTF-16 code unit is never a surrogate pair; widen to char.
    char::from_u32(unit as u32)
        .map(|c| c.to_string())
        .ok_or(RegistryError::InvalidUtf16 { offset })
}

/// GUIDs on disk follow the Microsoft mixed-endian layout: the first three
/// fields are little-endian, the last two (clock sequence + node) are
/// stored as-is.
fn decode_guid(data: &[u8], offset: u32) -> Result<Uuid> {
    if data.len() < 16 {
        return Err(RegistryError::TruncatedData {
            offset,
            expected: 16,
            actual: data.len(),
        });
    }
    let d1 = read_u32_le(data, 0)?;
    let d2 = read_u16_le(data, 4)?;
    let d3 = read_u16_le(data, 6)?;
    let mut d4 = [0u8; 8];
    d4.copy_from_slice(&data[8..16]);
    Ok(Uuid::from_fields(d1, d2, d3, &d4))
}

/// Decodes a `RegCompositeValue` stream: a sequence of self-describing
/// items, each padded to an 8-byte boundary.
///
/// Item layout: `[u32 total_len][u32 item_type][u32 name_len_units]`
/// `[name, (name_len_units + 1) * 2 bytes, UTF-16LE]`
/// `[data, total_len - 12 - (name_len_units + 1) * 2 bytes]`.
fn decode_composite_stream(data: &[u8], offset: u32) -> Result<Vec<CompositeItem>> {
    let mut items = Vec::new();
    let mut pos = 0usize;

    while pos + 12 <= data.len() {
        let item_start = pos;
        let total_len = read_u32_le(data, pos)? as usize;
        let item_type = read_u32_le(data, pos + 4)?;
        let name_len_units = read_u32_le(data, pos + 8)? as usize;

        let name_bytes_len = (name_len_units + 1) * 2;
        let name_start = pos + 12;
        let name_end = name_start.checked_add(name_bytes_len).ok_or(RegistryError::InvalidFormat(
            "composite item name length overflow".to_string(),
        ))?;
        if name_end > data.len() {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: name_end,
                actual: data.len(),
            });
        }
        let name = read_utf16_string(&data[name_start..name_end], offset)?;

        let header_and_name = 12 + name_bytes_len;
        if total_len < header_and_name {
            return Err(RegistryError::InvalidFormat(format!(
                "composite item total length {} smaller than its own header",
                total_len
            )));
        }
        let item_data_len = total_len - header_and_name;
        let item_data_start = name_end;
        let item_data_end = item_data_start.checked_add(item_data_len).ok_or(RegistryError::InvalidFormat(
            "composite item data length overflow".to_string(),
        ))?;
        if item_data_end > data.len() {
            return Err(RegistryError::TruncatedData {
                offset,
                expected: item_data_end,
                actual: data.len(),
            });
        }
        let item_data = &data[item_data_start..item_data_end];
        let item_value = ValueData::parse(item_data, ValueType::from_u32(item_type)?, offset)?;

        items.push(CompositeItem {
            name,
            value: Box::new(item_value),
        });

        // Items are padded to an 8-byte boundary from the start of this item.
        let next = item_start + total_len;
        let padded = (next + 7) & !7usize;
        if padded <= pos {
            break;
        }
        pos = padded.min(data.len());
    }

    Ok(items)
}

/// Decodes a sequence of `[u32 len][len bytes]` blobs that runs to the end
/// of the buffer, the convention shared by `RegBytesArray`.
fn decode_length_prefixed_blobs(data: &[u8]) -> Vec<Vec<u8>> {
    let mut blobs = Vec::new();
    let mut pos = 0usize;
    while pos + 4 <= data.len() {
        let len = match read_u32_le(data, pos) {
            Ok(l) => l as usize,
            Err(_) => break,
        };
        let start = pos + 4;
        let end = start.saturating_add(len);
        if end > data.len() {
            break;
        }
        blobs.push(data[start..end].to_vec());
        pos = end;
    }
    blobs
}

/// Decodes a sequence of `[u32 len][len bytes, UTF-16LE]` strings that runs
/// to the end of the buffer, the convention used by `RegUnicodeStringArray`.
fn decode_length_prefixed_strings(data: &[u8], offset: u32) -> Result<Vec<String>> {
    let mut strings = Vec::new();
    for blob in decode_length_prefixed_blobs(data) {
        strings.push(read_utf16_string(&blob, offset)?);
    }
    Ok(strings)
}

fn decode_fixed_array<T>(data: &[u8], item_size: usize, read_one: impl Fn(&[u8], usize) -> Result<T>) -> Result<Vec<T>> {
    let count = data.len() / item_size;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        out.push(read_one(data, i * item_size)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_key_minimum_size() {
        let data = vec![0u8; 19];
        let result = ValueKey::parse(&data, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_value_key_invalid_signature() {
        let mut data = vec![0u8; 24];
        data[0..2].copy_from_slice(b"XX");
        let result = ValueKey::parse(&data, 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_inline_data_uses_explicit_flag() {
        let mut data = vec![0u8; 24];
        data[0..2].copy_from_slice(b"vk");
        // data_length = 0x80000004: high bit set (inline), low bits = 4.
        data[4..8].copy_from_slice(&0x8000_0004u32.to_le_bytes());
        data[8..12].copy_from_slice(&[0x01, 0x02, 0x03, 0x04]);

        let vk = ValueKey::parse(&data, 0).unwrap();
        assert!(vk.is_inline_data());
        assert_eq!(vk.inline_data(), vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_non_inline_small_length_is_not_inline() {
        let mut data = vec![0u8; 24];
        data[0..2].copy_from_slice(b"vk");
        // Small length but the high bit is clear: not inline.
        data[4..8].copy_from_slice(&4u32.to_le_bytes());

        let vk = ValueKey::parse(&data, 0).unwrap();
        assert!(!vk.is_inline_data());
    }

    #[test]
    fn test_masked_data_type() {
        let mut data = vec![0u8; 24];
        data[0..2].copy_from_slice(b"vk");
        // High bits beyond 0x0FFF are reserved and must be masked away.
        data[0x0C..0x10].copy_from_slice(&0xF000_0004u32.to_le_bytes());

        let vk = ValueKey::parse(&data, 0).unwrap();
        assert_eq!(vk.data_type, ValueType::Dword);
    }

    #[test]
    fn test_dword_roundtrip() {
        let data = 0x1234_5678u32.to_le_bytes();
        let parsed = ValueData::parse(&data, ValueType::Dword, 0).unwrap();
        assert!(matches!(parsed, ValueData::Dword(0x1234_5678)));
    }

    #[test]
    fn test_guid_mixed_endian() {
        // {01020304-0506-0708-090A-0B0C0D0E0F10}
        let data: [u8; 16] = [
            0x04, 0x03, 0x02, 0x01, // Data1 LE
            0x06, 0x05, // Data2 LE
            0x08, 0x07, // Data3 LE
            0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F, 0x10, // Data4 as-is
        ];
        let uuid = decode_guid(&data, 0).unwrap();
        assert_eq!(uuid.to_string(), "01020304-0506-0708-090a-0b0c0d0e0f10");
    }

    #[test]
    fn test_extended_type_strips_trailing_timestamp() {
        let mut data = Vec::new();
        data.extend_from_slice(&99u32.to_le_bytes());
        data.extend_from_slice(&0u64.to_le_bytes()); // trailing timestamp
        let parsed = ValueData::parse(&data, ValueType::Uint32, 0).unwrap();
        assert!(matches!(parsed, ValueData::U32(99)));
    }

    #[test]
    fn test_unicode_string_array() {
        let mut data = Vec::new();
        let encode = |s: &str, out: &mut Vec<u8>| {
            let units: Vec<u8> = s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
            out.extend_from_slice(&(units.len() as u32).to_le_bytes());
            out.extend_from_slice(&units);
        };
        encode("alpha", &mut data);
        encode("beta", &mut data);

        let parsed = ValueData::parse(&data, ValueType::UnicodeStringArray, 0).unwrap();
        match parsed {
            ValueData::UnicodeStringArray(v) => assert_eq!(v, vec!["alpha".to_string(), "beta".to_string()]),
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_composite_stream_single_item() {
        let name = "x";
        let name_units: Vec<u16> = name.encode_utf16().collect();
        let name_bytes_len = (name_units.len() + 1) * 2;
        let item_data = 7u32.to_le_bytes();
        let total_len = 12 + name_bytes_len + item_data.len();

        let mut data = Vec::new();
        data.extend_from_slice(&(total_len as u32).to_le_bytes());
        data.extend_from_slice(&0x105u32.to_le_bytes()); // RegUint32
        data.extend_from_slice(&(name_units.len() as u32).to_le_bytes());
        for u in &name_units {
            data.extend_from_slice(&u.to_le_bytes());
        }
        data.extend_from_slice(&[0, 0]); // NUL terminator unit
        data.extend_from_slice(&item_data);
        while data.len() % 8 != 0 {
            data.push(0);
        }

        let items = decode_composite_stream(&data, 0).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "x");
        assert!(matches!(*items[0].value, ValueData::U32(7)));
    }
}

//! Registry cell type definitions and parsing.
//!
//! Cells are the fundamental data structures within registry hives. Each cell
//! has a 2-byte signature that identifies its type.

use crate::error::{RegistryError, Result};

/// Cell type signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellType {
    /// Key node (nk) - represents a registry key.
    KeyNode,

    /// Value key (vk) - represents a registry value.
    ValueKey,

    /// Security descriptor (sk).
    Security,

    /// Index leaf (li) - list of subkey offsets.
    IndexLeaf,

    /// Fast leaf (lf) - list of subkeys with name hints.
    FastLeaf,

    /// Hash leaf (lh) - list of subkeys with name hashes.
    HashLeaf,

    /// Index root (ri) - list of subkey list offsets.
    IndexRoot,

    /// Data block (db) - big data block.
    DataBlock,
}

impl CellType {
    /// Parses a cell type from a 2-byte signature.
    pub fn from_signature(sig: &[u8; 2]) -> Result<Self> {
        match sig {
            b"nk" => Ok(CellType::KeyNode),
            b"vk" => Ok(CellType::ValueKey),
            b"sk" => Ok(CellType::Security),
            b"li" => Ok(CellType::IndexLeaf),
            b"lf" => Ok(CellType::FastLeaf),
            b"lh" => Ok(CellType::HashLeaf),
            b"ri" => Ok(CellType::IndexRoot),
            b"db" => Ok(CellType::DataBlock),
            _ => Err(RegistryError::format_error(format!(
                "unrecognized cell signature {:?}",
                sig
            ))),
        }
    }

    /// Returns the 2-byte signature for this cell type.
    pub fn signature(&self) -> &'static [u8; 2] {
        match self {
            CellType::KeyNode => b"nk",
            CellType::ValueKey => b"vk",
            CellType::Security => b"sk",
            CellType::IndexLeaf => b"li",
            CellType::FastLeaf => b"lf",
            CellType::HashLeaf => b"lh",
            CellType::IndexRoot => b"ri",
            CellType::DataBlock => b"db",
        }
    }

    /// Returns true if this cell type represents a subkey list.
    pub fn is_subkey_list(&self) -> bool {
        matches!(
            self,
            CellType::IndexLeaf | CellType::FastLeaf | CellType::HashLeaf | CellType::IndexRoot
        )
    }
}

/// Flags for key nodes.
#[derive(Debug, Clone, Copy)]
pub struct KeyNodeFlags(pub u16);

impl KeyNodeFlags {
    /// Key is volatile (not stored on disk).
    pub const VOLATILE: u16 = 0x0001;

    /// Key is a mount point for another hive.
    pub const HIVE_EXIT: u16 = 0x0002;

    /// Key is the root key.
    pub const ROOT_KEY: u16 = 0x0004;

    /// Key cannot be deleted.
    pub const NO_DELETE: u16 = 0x0008;

    /// Key is a symbolic link.
    pub const SYM_LINK: u16 = 0x0010;

    /// Key name is in compressed format (ASCII).
    pub const COMP_NAME: u16 = 0x0020;

    /// Key is a predefined handle.
    pub const PREDEF_HANDLE: u16 = 0x0040;

    /// Key is part of a virtual store.
    pub const VIRT_SOURCE: u16 = 0x0080;

    /// Key is a virtual target.
    pub const VIRT_TARGET: u16 = 0x0100;

    /// Key is part of a virtual store.
    pub const VIRT_STORE: u16 = 0x0200;

    /// Creates a new KeyNodeFlags from a u16 value.
    pub fn new(flags: u16) -> Self {
        Self(flags)
    }

    /// Returns true if the specified flag is set.
    pub fn has_flag(&self, flag: u16) -> bool {
        (self.0 & flag) != 0
    }

    /// Returns true if the key name is compressed (ASCII).
    pub fn is_compressed(&self) -> bool {
        self.has_flag(Self::COMP_NAME)
    }

    /// Returns true if this is a volatile key.
    pub fn is_volatile(&self) -> bool {
        self.has_flag(Self::VOLATILE)
    }

    /// Returns true if this is the root key.
    pub fn is_root(&self) -> bool {
        self.has_flag(Self::ROOT_KEY)
    }
}

/// Registry value data types.
///
/// Covers the classic `REG_*` types plus the extended set (0x101-0x11F) used
/// by `settings.dat`-style app-data hives, where a value's type doubles as a
/// tag for a self-describing scalar, array, or composite stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// REG_NONE
    None,
    /// REG_SZ
    String,
    /// REG_EXPAND_SZ
    ExpandString,
    /// REG_BINARY
    Binary,
    /// REG_DWORD / REG_DWORD_LITTLE_ENDIAN
    Dword,
    /// REG_DWORD_BIG_ENDIAN
    DwordBigEndian,
    /// REG_LINK
    Link,
    /// REG_MULTI_SZ
    MultiString,
    /// REG_RESOURCE_LIST
    ResourceList,
    /// REG_FULL_RESOURCE_DESCRIPTOR
    FullResourceDescriptor,
    /// REG_RESOURCE_REQUIREMENTS_LIST
    ResourceRequirementsList,
    /// REG_QWORD / REG_QWORD_LITTLE_ENDIAN
    Qword,
    /// REG_FILETIME (settings.dat convention; not a classic Win32 type)
    FileTime,

    /// RegUint8 (0x101)
    Uint8,
    /// RegInt16 (0x102)
    Int16,
    /// RegUint16 (0x103)
    Uint16,
    /// RegInt32 (0x104)
    Int32,
    /// RegUint32 (0x105)
    Uint32,
    /// RegInt64 (0x106)
    Int64,
    /// RegUint64 (0x107)
    Uint64,
    /// RegFloat (0x108)
    Float,
    /// RegDouble (0x109)
    Double,
    /// RegUnicodeChar (0x10A) - a single UTF-16 code unit
    UnicodeChar,
    /// RegBoolean (0x10B)
    Boolean,
    /// RegUnicodeString (0x10C)
    UnicodeString,
    /// RegCompositeValue (0x10D) - a self-describing stream of named items
    CompositeValue,
    /// RegDateTimeOffset (0x10E)
    DateTimeOffset,
    /// RegTimeSpan (0x10F)
    TimeSpan,
    /// RegGUID (0x110)
    Guid,
    /// RegUnk111 (0x111) - known to exist, decode undocumented
    Unk111,
    /// RegUnk112 (0x112) - known to exist, decode undocumented
    Unk112,
    /// RegUnk113 (0x113) - known to exist, decode undocumented
    Unk113,
    /// RegBytesArray (0x114)
    BytesArray,
    /// RegInt16Array (0x115)
    Int16Array,
    /// RegUint16Array (0x116)
    Uint16Array,
    /// RegInt32Array (0x117)
    Int32Array,
    /// RegUInt32Array (0x118)
    Uint32Array,
    /// RegInt64Array (0x119)
    Int64Array,
    /// RegUInt64Array (0x11A)
    Uint64Array,
    /// RegFloatArray (0x11B)
    FloatArray,
    /// RegDoubleArray (0x11C)
    DoubleArray,
    /// RegUnicodeCharArray (0x11D)
    UnicodeCharArray,
    /// RegBooleanArray (0x11E)
    BooleanArray,
    /// RegUnicodeStringArray (0x11F)
    UnicodeStringArray,

    /// Unknown or non-standard value type.
    /// Contains the raw type value.
    Unknown(u32),
}

impl ValueType {
    /// Parses a value type from the masked `data_type` dword of a `vk` cell.
    ///
    /// Every type code in the classic and extended ranges is recognized;
    /// anything else is preserved verbatim as `Unknown` rather than treated
    /// as an error, matching the on-disk format's own openness to
    /// forward-compatible type values.
    pub fn from_u32(value: u32) -> Result<Self> {
        Ok(match value {
            0 => ValueType::None,
            1 => ValueType::String,
            2 => ValueType::ExpandString,
            3 => ValueType::Binary,
            4 => ValueType::Dword,
            5 => ValueType::DwordBigEndian,
            6 => ValueType::Link,
            7 => ValueType::MultiString,
            8 => ValueType::ResourceList,
            9 => ValueType::FullResourceDescriptor,
            10 => ValueType::ResourceRequirementsList,
            11 => ValueType::Qword,
            0x10 => ValueType::FileTime,

            0x101 => ValueType::Uint8,
            0x102 => ValueType::Int16,
            0x103 => ValueType::Uint16,
            0x104 => ValueType::Int32,
            0x105 => ValueType::Uint32,
            0x106 => ValueType::Int64,
            0x107 => ValueType::Uint64,
            0x108 => ValueType::Float,
            0x109 => ValueType::Double,
            0x10A => ValueType::UnicodeChar,
            0x10B => ValueType::Boolean,
            0x10C => ValueType::UnicodeString,
            0x10D => ValueType::CompositeValue,
            0x10E => ValueType::DateTimeOffset,
            0x10F => ValueType::TimeSpan,
            0x110 => ValueType::Guid,
            0x111 => ValueType::Unk111,
            0x112 => ValueType::Unk112,
            0x113 => ValueType::Unk113,
            0x114 => ValueType::BytesArray,
            0x115 => ValueType::Int16Array,
            0x116 => ValueType::Uint16Array,
            0x117 => ValueType::Int32Array,
            0x118 => ValueType::Uint32Array,
            0x119 => ValueType::Int64Array,
            0x11A => ValueType::Uint64Array,
            0x11B => ValueType::FloatArray,
            0x11C => ValueType::DoubleArray,
            0x11D => ValueType::UnicodeCharArray,
            0x11E => ValueType::BooleanArray,
            0x11F => ValueType::UnicodeStringArray,

            other => ValueType::Unknown(other),
        })
    }

    /// Returns true if this type code falls in the extended settings.dat
    /// range (0x101-0x11F), which is wrapped with a trailing 8-byte
    /// timestamp that must be stripped before decoding.
    pub fn is_extended(&self) -> bool {
        matches!(
            self,
            ValueType::Uint8
                | ValueType::Int16
                | ValueType::Uint16
                | ValueType::Int32
                | ValueType::Uint32
                | ValueType::Int64
                | ValueType::Uint64
                | ValueType::Float
                | ValueType::Double
                | ValueType::UnicodeChar
                | ValueType::Boolean
                | ValueType::UnicodeString
                | ValueType::CompositeValue
                | ValueType::DateTimeOffset
                | ValueType::TimeSpan
                | ValueType::Guid
                | ValueType::Unk111
                | ValueType::Unk112
                | ValueType::Unk113
                | ValueType::BytesArray
                | ValueType::Int16Array
                | ValueType::Uint16Array
                | ValueType::Int32Array
                | ValueType::Uint32Array
                | ValueType::Int64Array
                | ValueType::Uint64Array
                | ValueType::FloatArray
                | ValueType::DoubleArray
                | ValueType::UnicodeCharArray
                | ValueType::BooleanArray
                | ValueType::UnicodeStringArray
        )
    }

    /// String-family types accepted by `RegistryValue::get_string`.
    pub fn is_string_like(&self) -> bool {
        matches!(
            self,
            ValueType::String | ValueType::ExpandString | ValueType::Link | ValueType::UnicodeString
        )
    }

    /// Byte-array-family types accepted by `RegistryValue::get_binary`.
    pub fn is_binary_like(&self) -> bool {
        matches!(
            self,
            ValueType::Binary
                | ValueType::ResourceList
                | ValueType::FullResourceDescriptor
                | ValueType::ResourceRequirementsList
                | ValueType::BytesArray
        )
    }

    /// 32-bit-integer-family types accepted by `RegistryValue::get_u32`.
    pub fn is_int32_like(&self) -> bool {
        matches!(
            self,
            ValueType::Dword | ValueType::DwordBigEndian | ValueType::Int32 | ValueType::Uint32
        )
    }

    /// 64-bit-integer-family types accepted by `RegistryValue::get_u64`.
    pub fn is_int64_like(&self) -> bool {
        matches!(self, ValueType::Qword | ValueType::Int64 | ValueType::Uint64)
    }

    /// Returns the name of this value type.
    pub fn name(&self) -> String {
        match self {
            ValueType::None => "REG_NONE".to_string(),
            ValueType::String => "REG_SZ".to_string(),
            ValueType::ExpandString => "REG_EXPAND_SZ".to_string(),
            ValueType::Binary => "REG_BINARY".to_string(),
            ValueType::Dword => "REG_DWORD".to_string(),
            ValueType::DwordBigEndian => "REG_DWORD_BIG_ENDIAN".to_string(),
            ValueType::Link => "REG_LINK".to_string(),
            ValueType::MultiString => "REG_MULTI_SZ".to_string(),
            ValueType::ResourceList => "REG_RESOURCE_LIST".to_string(),
            ValueType::FullResourceDescriptor => "REG_FULL_RESOURCE_DESCRIPTOR".to_string(),
            ValueType::ResourceRequirementsList => "REG_RESOURCE_REQUIREMENTS_LIST".to_string(),
            ValueType::Qword => "REG_QWORD".to_string(),
            ValueType::FileTime => "REG_FILETIME".to_string(),
            ValueType::Uint8 => "RegUint8".to_string(),
            ValueType::Int16 => "RegInt16".to_string(),
            ValueType::Uint16 => "RegUint16".to_string(),
            ValueType::Int32 => "RegInt32".to_string(),
            ValueType::Uint32 => "RegUint32".to_string(),
            ValueType::Int64 => "RegInt64".to_string(),
            ValueType::Uint64 => "RegUint64".to_string(),
            ValueType::Float => "RegFloat".to_string(),
            ValueType::Double => "RegDouble".to_string(),
            ValueType::UnicodeChar => "RegUnicodeChar".to_string(),
            ValueType::Boolean => "RegBoolean".to_string(),
            ValueType::UnicodeString => "RegUnicodeString".to_string(),
            ValueType::CompositeValue => "RegCompositeValue".to_string(),
            ValueType::DateTimeOffset => "RegDateTimeOffset".to_string(),
            ValueType::TimeSpan => "RegTimeSpan".to_string(),
            ValueType::Guid => "RegGUID".to_string(),
            ValueType::Unk111 => "RegUnk111".to_string(),
            ValueType::Unk112 => "RegUnk112".to_string(),
            ValueType::Unk113 => "RegUnk113".to_string(),
            ValueType::BytesArray => "RegBytesArray".to_string(),
            ValueType::Int16Array => "RegInt16Array".to_string(),
            ValueType::Uint16Array => "RegUint16Array".to_string(),
            ValueType::Int32Array => "RegInt32Array".to_string(),
            ValueType::Uint32Array => "RegUInt32Array".to_string(),
            ValueType::Int64Array => "RegInt64Array".to_string(),
            ValueType::Uint64Array => "RegUInt64Array".to_string(),
            ValueType::FloatArray => "RegFloatArray".to_string(),
            ValueType::DoubleArray => "RegDoubleArray".to_string(),
            ValueType::UnicodeCharArray => "RegUnicodeCharArray".to_string(),
            ValueType::BooleanArray => "RegBooleanArray".to_string(),
            ValueType::UnicodeStringArray => "RegUnicodeStringArray".to_string(),
            ValueType::Unknown(value) => format!("REG_UNKNOWN_{:#010x}", value),
        }
    }

    /// Returns the raw on-disk type code this variant was parsed from.
    pub fn to_u32(&self) -> u32 {
        match self {
            ValueType::None => 0,
            ValueType::String => 1,
            ValueType::ExpandString => 2,
            ValueType::Binary => 3,
            ValueType::Dword => 4,
            ValueType::DwordBigEndian => 5,
            ValueType::Link => 6,
            ValueType::MultiString => 7,
            ValueType::ResourceList => 8,
            ValueType::FullResourceDescriptor => 9,
            ValueType::ResourceRequirementsList => 10,
            ValueType::Qword => 11,
            ValueType::FileTime => 0x10,
            ValueType::Uint8 => 0x101,
            ValueType::Int16 => 0x102,
            ValueType::Uint16 => 0x103,
            ValueType::Int32 => 0x104,
            ValueType::Uint32 => 0x105,
            ValueType::Int64 => 0x106,
            ValueType::Uint64 => 0x107,
            ValueType::Float => 0x108,
            ValueType::Double => 0x109,
            ValueType::UnicodeChar => 0x10A,
            ValueType::Boolean => 0x10B,
            ValueType::UnicodeString => 0x10C,
            ValueType::CompositeValue => 0x10D,
            ValueType::DateTimeOffset => 0x10E,
            ValueType::TimeSpan => 0x10F,
            ValueType::Guid => 0x110,
            ValueType::Unk111 => 0x111,
            ValueType::Unk112 => 0x112,
            ValueType::Unk113 => 0x113,
            ValueType::BytesArray => 0x114,
            ValueType::Int16Array => 0x115,
            ValueType::Uint16Array => 0x116,
            ValueType::Int32Array => 0x117,
            ValueType::Uint32Array => 0x118,
            ValueType::Int64Array => 0x119,
            ValueType::Uint64Array => 0x11A,
            ValueType::FloatArray => 0x11B,
            ValueType::DoubleArray => 0x11C,
            ValueType::UnicodeCharArray => 0x11D,
            ValueType::BooleanArray => 0x11E,
            ValueType::UnicodeStringArray => 0x11F,
            ValueType::Unknown(value) => *value,
        }
    }
}

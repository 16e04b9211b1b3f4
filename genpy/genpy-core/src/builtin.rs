use std::{fmt, str::FromStr};

use crate::error::MsgGenerationError;

/// Builtin field types of the message IDL.
///
/// `Header` is not a builtin: it names the registered `std_msgs/Header`
/// message and is handled as a special type by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
    String,
    Bool,
    /// Deprecated alias carried over from early IDL versions; unsigned on the wire.
    Char,
    /// Deprecated alias carried over from early IDL versions; signed on the wire.
    Byte,
    Time,
    Duration,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 16] = [
        BuiltinType::Int8,
        BuiltinType::UInt8,
        BuiltinType::Int16,
        BuiltinType::UInt16,
        BuiltinType::Int32,
        BuiltinType::UInt32,
        BuiltinType::Int64,
        BuiltinType::UInt64,
        BuiltinType::Float32,
        BuiltinType::Float64,
        BuiltinType::String,
        BuiltinType::Bool,
        BuiltinType::Char,
        BuiltinType::Byte,
        BuiltinType::Time,
        BuiltinType::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::UInt8 => "uint8",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::Int32 => "int32",
            Self::UInt32 => "uint32",
            Self::Int64 => "int64",
            Self::UInt64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Byte => "byte",
            Self::Time => "time",
            Self::Duration => "duration",
        }
    }

    /// Look up a builtin by its IDL keyword.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::UInt8
                | Self::Int16
                | Self::UInt16
                | Self::Int32
                | Self::UInt32
                | Self::Int64
                | Self::UInt64
                | Self::Char
                | Self::Byte
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Arrays of these types are carried as byte strings rather than lists.
    pub fn is_byte_blob(&self) -> bool {
        matches!(self, Self::UInt8 | Self::Byte)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Time | Self::Duration)
    }

    /// Single-character little-endian struct code for fixed-width scalars.
    ///
    /// `None` for `string`, `time` and `duration`, which are not single values on the wire.
    pub fn struct_code(&self) -> Option<char> {
        Some(match self {
            Self::Int8 | Self::Byte => 'b',
            Self::UInt8 | Self::Bool | Self::Char => 'B',
            Self::Int16 => 'h',
            Self::UInt16 => 'H',
            Self::Int32 => 'i',
            Self::UInt32 => 'I',
            Self::Int64 => 'q',
            Self::UInt64 => 'Q',
            Self::Float32 => 'f',
            Self::Float64 => 'd',
            Self::String | Self::Time | Self::Duration => return None,
        })
    }

    /// Inclusive integer range, for constant validation.
    pub(crate) fn integer_range(&self) -> Option<(i128, i128)> {
        Some(match self {
            Self::Int8 | Self::Byte => (i8::MIN as i128, i8::MAX as i128),
            Self::UInt8 | Self::Char => (0, u8::MAX as i128),
            Self::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Self::UInt16 => (0, u16::MAX as i128),
            Self::Int32 => (i32::MIN as i128, i32::MAX as i128),
            Self::UInt32 => (0, u32::MAX as i128),
            Self::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Self::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        })
    }
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuiltinType {
    type Err = MsgGenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| MsgGenerationError::IllegalType {
            type_ref: s.to_string(),
        })
    }
}

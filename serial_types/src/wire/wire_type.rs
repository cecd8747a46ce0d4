use derive_more::{Deref, From};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::fmt;

/// The raw 5-bit type field of a header byte.
///
/// Kept apart from [`WireType`] because a corrupt stream may carry codes outside the enum,
/// and diagnostics still want to name them.
#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct TypeTag(u8);
impl From<WireType> for TypeTag {
    fn from(wire_type: WireType) -> Self {
        let int = wire_type.to_u8().unwrap_or_default();
        Self(int)
    }
}
impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match WireType::from_u8(self.0) {
            Some(WireType::Unknown) | None => write!(f, "unknown ({})", self.0),
            Some(wire_type) => f.write_str(wire_type.name()),
        }
    }
}

/// The closed set of wire types. The discriminants are the on-wire codes.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, FromPrimitive, ToPrimitive, Debug)]
pub enum WireType {
    Unknown = 0,
    Byte = 1,
    Int = 2,
    Long = 3,
    Float = 4,
    Double = 5,
    Boolean = 6,
    Null = 7,
    StringUtf8 = 8,
    StartObject = 9,
    StartObjectDebug = 10,
    EndObject = 11,
    /// Never written. Returned by peeks at the end of the input.
    EOF = 12,
    StringAscii = 13,
    ByteArray = 14,
}

impl WireType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::StringAscii | Self::StringUtf8 => "string",
            Self::Null => "null",
            Self::StartObject | Self::StartObjectDebug => "start_object",
            Self::EndObject => "end_object",
            Self::EOF => "eof",
            Self::ByteArray => "byte_array",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::StringAscii | Self::StringUtf8)
    }

    pub fn is_object_start(&self) -> bool {
        matches!(self, Self::StartObject | Self::StartObjectDebug)
    }
}

/// Codes outside the table map to [`WireType::Unknown`].
impl From<TypeTag> for WireType {
    fn from(tag: TypeTag) -> Self {
        WireType::from_u8(tag.0).unwrap_or(WireType::Unknown)
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

use crate::wire::{TypeTag, WireType};
use derive_more::{Deref, From};
use std::mem;

pub const SUBTYPE_DEFAULT: u8 = 0;
pub const SUBTYPE_BYTE: u8 = 1;
pub const SUBTYPE_SHORT: u8 = 2;
pub const SUBTYPE_INT: u8 = 3;
pub const SUBTYPE_LONG: u8 = 4;

pub const SUBTYPE_FALSE: u8 = SUBTYPE_DEFAULT;
pub const SUBTYPE_TRUE: u8 = 1;

pub const SIZE_BYTE: usize = mem::size_of::<u8>();
pub const SIZE_SHORT: usize = mem::size_of::<u16>();
pub const SIZE_INT: usize = mem::size_of::<i32>();
pub const SIZE_LONG: usize = mem::size_of::<i64>();
pub const SIZE_FLOAT: usize = mem::size_of::<f32>();
pub const SIZE_DOUBLE: usize = mem::size_of::<f64>();

const TYPE_BITS: u8 = 5;
const TYPE_MASK: u8 = (1 << TYPE_BITS) - 1;
const SUBTYPE_BITS: u8 = 8 - TYPE_BITS;
const SUBTYPE_MASK: u8 = (1 << SUBTYPE_BITS) - 1;

/// One header byte: `(type << 3) | subtype`.
#[derive(From, Deref, PartialEq, Eq, Clone, Copy, Debug)]
pub struct Header(u8);

impl Header {
    /// Bits outside each field's width are discarded.
    pub const fn pack(tag: u8, subtype: u8) -> Self {
        Self(((tag & TYPE_MASK) << SUBTYPE_BITS) | (subtype & SUBTYPE_MASK))
    }

    pub fn new(wire_type: WireType, subtype: u8) -> Self {
        Self::pack(*TypeTag::from(wire_type), subtype)
    }

    pub fn tag(&self) -> TypeTag {
        TypeTag::from((self.0 >> SUBTYPE_BITS) & TYPE_MASK)
    }

    pub fn wire_type(&self) -> WireType {
        WireType::from(self.tag())
    }

    pub fn subtype(&self) -> u8 {
        self.0 & SUBTYPE_MASK
    }
}

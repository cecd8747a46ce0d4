//! # Serialization format
//!
//! A serialized stream is a sequence of units. Every unit starts with one header byte,
//! which packs a `wire_type` in the high 5 bits and a `subtype` in the low 3 bits.
//!
//! ```text
//! header := (wire_type << 3) | subtype
//! ```
//!
//! Subtype 0 always means "the default value; no payload follows".
//! For integer-like payloads (int, long, object version, string and byte-array lengths)
//! the subtype carries the width of the payload, which follows the header big-endian.
//!
//! ```text
//! subtype:    0 => no payload, value 0
//!             1 => u8
//!             2 => u16
//!             3 => i32
//!             4 => i64          (long only)
//! ```
//!
//! A long whose high 32 bits are all zero is written through the int subtypes,
//! and is read back as the unsigned 32-bit value. Every other long takes subtype 4.
//!
//! The units, by `wire_type`:
//!
//! ```text
//! struct Byte         { header: u8,   body: [u8; 0 or 1] }
//! struct Int          { header: u8,   body: [u8; 0, 1, 2 or 4] }
//! struct Long         { header: u8,   body: [u8; 0, 1, 2, 4 or 8] }
//! struct Float        { header: u8,   body: [u8; 0 or 4] }
//! struct Double       { header: u8,   body: [u8; 0 or 8] }
//! struct Boolean      { header: u8 }                          // subtype 0 or 1
//! struct Null         { header: u8 }
//! struct AsciiString  { header: u8,   len: int_payload,   body: [u8; len] }
//! struct Utf8String   { header: u8,   len: int_payload,   body: utf8 bytes }
//! struct ByteArray    { header: u8,   len: int_payload,   body: [u8; len] }
//!
//! struct Object {
//!     start:      StartObject { header: u8, version: int_payload }
//!              or StartObjectDebug { header: u8, version: int_payload, class_name: String },
//!     fields:     Unit*,
//!     end:        EndObject { header: u8 },
//! }
//! ```
//!
//! String lengths count UTF-16 code units. A supplementary code point is one 4-byte
//! UTF-8 sequence that accounts for two units of the length.
//!
//! Objects carry no length prefix. Skipping one means counting start and end markers.

mod header;
mod reader;
mod wire_type;
mod writer;

pub use header::*;
pub use reader::*;
pub use wire_type::*;
pub use writer::*;

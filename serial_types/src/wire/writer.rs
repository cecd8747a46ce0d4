use crate::wire::{
    Header, WireType, SUBTYPE_BYTE, SUBTYPE_DEFAULT, SUBTYPE_FALSE, SUBTYPE_INT, SUBTYPE_LONG,
    SUBTYPE_SHORT, SUBTYPE_TRUE,
};
use crate::{SerialError, SerialResult};
use std::iter::Peekable;

pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Writes units into a byte buffer that doubles in size whenever a write does not fit.
///
/// The whole length of the backing `Vec` is usable space; the cursor marks how much of it
/// holds serialized data. Use [`SerialWriter::serialized_data`] to get exactly that part.
pub struct SerialWriter {
    buf: Vec<u8>,
    pos: usize,
}

impl Default for SerialWriter {
    fn default() -> Self {
        Self::new()
    }
}

/* Construction and inspection. */
impl SerialWriter {
    pub fn new() -> Self {
        Self::with_buffer(vec![0u8; DEFAULT_BUFFER_SIZE])
    }

    /// Writes into `buf`, e.g. one that was borrowed from a pool.
    /// An empty `buf` is replaced by a default sized one.
    pub fn with_buffer(buf: Vec<u8>) -> Self {
        let buf = if buf.is_empty() {
            vec![0u8; DEFAULT_BUFFER_SIZE]
        } else {
            buf
        };
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn buffer_capacity(&self) -> usize {
        self.buf.len()
    }

    /// A copy of `[0, position)`.
    pub fn serialized_data(&self) -> Vec<u8> {
        self.buf[..self.pos].to_vec()
    }

    /// Gives back the backing buffer, which may have been replaced by a larger one.
    pub fn into_buffer(self) -> Vec<u8> {
        self.buf
    }

    /// The wire type of the unit that starts at `pos`, or EOF if nothing was written there.
    pub fn peek_type_at_position(&self, pos: usize) -> WireType {
        if pos < self.pos {
            Header::from(self.buf[pos]).wire_type()
        } else {
            WireType::EOF
        }
    }
}

/* Primitives. */
impl SerialWriter {
    pub fn write_byte(&mut self, val: u8) -> &mut Self {
        if val == 0 {
            self.write_header(Header::new(WireType::Byte, SUBTYPE_DEFAULT));
        } else {
            self.write_header(Header::new(WireType::Byte, SUBTYPE_BYTE));
            self.put(&[val]);
        }
        self
    }

    pub fn write_boolean(&mut self, val: bool) -> &mut Self {
        let subtype = if val { SUBTYPE_TRUE } else { SUBTYPE_FALSE };
        self.write_header(Header::new(WireType::Boolean, subtype));
        self
    }

    pub fn write_int(&mut self, val: i32) -> &mut Self {
        self.write_int_header(WireType::Int, val);
        self
    }

    pub fn write_long(&mut self, val: i64) -> &mut Self {
        self.write_long_header(WireType::Long, val);
        self
    }

    /// Only an all-zero bit pattern takes the short form, so `-0.0` keeps its sign.
    pub fn write_float(&mut self, val: f32) -> &mut Self {
        if val.to_bits() == 0 {
            self.write_header(Header::new(WireType::Float, SUBTYPE_DEFAULT));
        } else {
            self.write_header(Header::new(WireType::Float, SUBTYPE_INT));
            self.put(&val.to_be_bytes());
        }
        self
    }

    pub fn write_double(&mut self, val: f64) -> &mut Self {
        if val.to_bits() == 0 {
            self.write_header(Header::new(WireType::Double, SUBTYPE_DEFAULT));
        } else {
            self.write_header(Header::new(WireType::Double, SUBTYPE_LONG));
            self.put(&val.to_be_bytes());
        }
        self
    }

    pub fn write_null(&mut self) -> &mut Self {
        self.write_header(Header::new(WireType::Null, SUBTYPE_DEFAULT));
        self
    }

    pub fn write_string(&mut self, val: &str) -> SerialResult<&mut Self> {
        if val.is_empty() {
            self.write_header(Header::new(WireType::StringAscii, SUBTYPE_DEFAULT));
        } else {
            let len = val.encode_utf16().count();
            self.encode_string(len, val.encode_utf16())?;
        }
        Ok(self)
    }

    /// Writes a string given as raw UTF-16 units, which may hold unpaired surrogates.
    /// Each unpaired surrogate is written as `?`.
    pub fn write_utf16(&mut self, units: &[u16]) -> SerialResult<&mut Self> {
        if units.is_empty() {
            self.write_header(Header::new(WireType::StringAscii, SUBTYPE_DEFAULT));
        } else {
            self.encode_string(units.len(), units.iter().copied())?;
        }
        Ok(self)
    }

    pub fn write_opt_string(&mut self, val: Option<&str>) -> SerialResult<&mut Self> {
        match val {
            None => Ok(self.write_null()),
            Some(s) => self.write_string(s),
        }
    }

    pub fn write_bytes(&mut self, val: &[u8]) -> SerialResult<&mut Self> {
        if val.is_empty() {
            self.write_header(Header::new(WireType::ByteArray, SUBTYPE_DEFAULT));
        } else {
            self.write_length(WireType::ByteArray, val.len())?;
            self.put(val);
        }
        Ok(self)
    }

    pub fn write_opt_bytes(&mut self, val: Option<&[u8]>) -> SerialResult<&mut Self> {
        match val {
            None => Ok(self.write_null()),
            Some(b) => self.write_bytes(b),
        }
    }
}

/* Object framing. */
impl SerialWriter {
    pub fn write_object_start(&mut self, version: u32) -> SerialResult<&mut Self> {
        let version = Self::checked_version(version)?;
        self.write_int_header(WireType::StartObject, version);
        Ok(self)
    }

    pub fn write_debug_object_start(
        &mut self,
        version: u32,
        class_name: &str,
    ) -> SerialResult<&mut Self> {
        let version = Self::checked_version(version)?;
        self.write_int_header(WireType::StartObjectDebug, version);
        self.write_string(class_name)?;
        Ok(self)
    }

    pub fn write_object_end(&mut self) -> &mut Self {
        self.write_header(Header::new(WireType::EndObject, SUBTYPE_DEFAULT));
        self
    }

    fn checked_version(version: u32) -> SerialResult<i32> {
        i32::try_from(version).map_err(|_| {
            SerialError::structural(format!("The version number is too large: {version}."))
        })
    }
}

/* Headers and payloads. */
impl SerialWriter {
    fn write_header(&mut self, header: Header) {
        self.put(&[*header]);
    }

    fn write_int_header(&mut self, wire_type: WireType, val: i32) {
        let bits = val as u32;
        if bits == 0 {
            self.write_header(Header::new(wire_type, SUBTYPE_DEFAULT));
        } else if bits & 0xFFFF_FF00 == 0 {
            self.write_header(Header::new(wire_type, SUBTYPE_BYTE));
            self.put(&[bits as u8]);
        } else if bits & 0xFFFF_0000 == 0 {
            self.write_header(Header::new(wire_type, SUBTYPE_SHORT));
            self.put(&(bits as u16).to_be_bytes());
        } else {
            self.write_header(Header::new(wire_type, SUBTYPE_INT));
            self.put(&val.to_be_bytes());
        }
    }

    fn write_long_header(&mut self, wire_type: WireType, val: i64) {
        let bits = val as u64;
        if bits & 0xFFFF_FFFF_0000_0000 == 0 {
            self.write_int_header(wire_type, bits as u32 as i32);
        } else {
            self.write_header(Header::new(wire_type, SUBTYPE_LONG));
            self.put(&val.to_be_bytes());
        }
    }

    fn write_length(&mut self, wire_type: WireType, len: usize) -> SerialResult<()> {
        let len = checked_length(len)?;
        self.write_int_header(wire_type, len);
        Ok(())
    }

    fn put(&mut self, bytes: &[u8]) {
        self.ensure_capacity(bytes.len());
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }

    fn ensure_capacity(&mut self, size_needed: usize) {
        while self.buf.len() - self.pos < size_needed {
            let mut grown = vec![0u8; 2 * self.buf.len()];
            grown[..self.pos].copy_from_slice(&self.buf[..self.pos]);
            self.buf = grown;
        }
    }
}

/* Strings. */
impl SerialWriter {
    /// Writes the ASCII header up front and back-patches it to the UTF-8 header
    /// once a non-ASCII unit shows up. Both headers carry the same length,
    /// so the patch never changes the header's size.
    fn encode_string<I>(&mut self, len: usize, units: I) -> SerialResult<()>
    where
        I: Iterator<Item = u16>,
    {
        let header_pos = self.pos;
        self.write_length(WireType::StringAscii, len)?;

        let mut is_ascii = true;
        let mut units: Peekable<I> = units.peekable();
        while let Some(unit) = units.next() {
            let ch = unit as u32;
            if ch < 0x80 {
                self.put(&[ch as u8]);
                continue;
            }

            is_ascii = false;
            if ch < 0x800 {
                self.put(&[(ch >> 6) as u8 | 0xC0, (ch & 0x3F) as u8 | 0x80]);
            } else if is_surrogate(ch) {
                let trail = units.peek().map(|u| *u as u32);
                match trail {
                    Some(trail) if is_surrogate_lead(ch) && is_surrogate_trail(trail) => {
                        units.next();
                        let cp = supplementary(ch, trail);
                        self.put(&[
                            (cp >> 18) as u8 | 0xF0,
                            ((cp >> 12) & 0x3F) as u8 | 0x80,
                            ((cp >> 6) & 0x3F) as u8 | 0x80,
                            (cp & 0x3F) as u8 | 0x80,
                        ]);
                    }
                    _ => self.put(&[b'?']),
                }
            } else {
                self.put(&[
                    (ch >> 12) as u8 | 0xE0,
                    ((ch >> 6) & 0x3F) as u8 | 0x80,
                    (ch & 0x3F) as u8 | 0x80,
                ]);
            }
        }

        if !is_ascii {
            let end_pos = self.pos;
            self.pos = header_pos;
            self.write_length(WireType::StringUtf8, len)?;
            self.pos = end_pos;
        }
        Ok(())
    }
}

/// Lengths travel through the int scheme, so they must fit in an `i32`.
fn checked_length(len: usize) -> SerialResult<i32> {
    i32::try_from(len)
        .map_err(|_| SerialError::structural(format!("Too long to serialize: {len} units.")))
}

fn is_surrogate(ch: u32) -> bool {
    ch & 0xFFFF_F800 == 0xD800
}

fn is_surrogate_lead(ch: u32) -> bool {
    ch & 0x400 == 0
}

fn is_surrogate_trail(ch: u32) -> bool {
    is_surrogate(ch) && ch & 0x400 != 0
}

fn supplementary(lead: u32, trail: u32) -> u32 {
    0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00)
}

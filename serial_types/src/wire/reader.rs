use crate::wire::{
    Header, TypeTag, WireType, SIZE_BYTE, SIZE_DOUBLE, SIZE_FLOAT, SIZE_INT, SIZE_LONG,
    SIZE_SHORT, SUBTYPE_BYTE, SUBTYPE_DEFAULT, SUBTYPE_INT, SUBTYPE_LONG, SUBTYPE_SHORT,
    SUBTYPE_TRUE,
};
use crate::{SerialError, SerialResult};

/// What an object start marker carries.
/// `class_name` is present only when the marker was written under the debug context.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ObjectStart {
    pub version: u32,
    pub class_name: Option<String>,
}

/// Reads units written by [`crate::wire::SerialWriter`] from a fixed byte sequence.
///
/// A read that meets an unexpected header leaves the cursor in front of that header.
pub struct SerialReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

/* Construction and inspection. */
impl<'a> SerialReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The wire type of the next unit, without consuming it. EOF only at the end of the input;
    /// an EOF code found in the stream peeks as unknown.
    pub fn peek_type(&self) -> WireType {
        match self.peek_header().map(|header| header.wire_type()) {
            None => WireType::EOF,
            Some(WireType::EOF) => WireType::Unknown,
            Some(wire_type) => wire_type,
        }
    }

    /// The raw type field of the next unit, without consuming it.
    pub fn peek_tag(&self) -> Option<TypeTag> {
        self.peek_header().map(|header| header.tag())
    }

    fn peek_header(&self) -> Option<Header> {
        self.buf.get(self.pos).map(|byte| Header::from(*byte))
    }
}

/* Primitives. */
impl<'a> SerialReader<'a> {
    pub fn read_byte(&mut self) -> SerialResult<u8> {
        let subtype = self.read_header(WireType::Byte)?;
        if subtype == SUBTYPE_DEFAULT {
            return Ok(0);
        }
        let [byte] = self.take_array::<SIZE_BYTE>()?;
        Ok(byte)
    }

    pub fn read_boolean(&mut self) -> SerialResult<bool> {
        let subtype = self.read_header(WireType::Boolean)?;
        Ok(subtype == SUBTYPE_TRUE)
    }

    pub fn read_int(&mut self) -> SerialResult<i32> {
        self.read_int_header(WireType::Int)
    }

    pub fn read_long(&mut self) -> SerialResult<i64> {
        self.read_long_header(WireType::Long)
    }

    pub fn read_float(&mut self) -> SerialResult<f32> {
        let subtype = self.read_header(WireType::Float)?;
        if subtype == SUBTYPE_DEFAULT {
            return Ok(0f32);
        }
        let buf = self.take_array::<SIZE_FLOAT>()?;
        Ok(f32::from_be_bytes(buf))
    }

    pub fn read_double(&mut self) -> SerialResult<f64> {
        let subtype = self.read_header(WireType::Double)?;
        if subtype == SUBTYPE_DEFAULT {
            return Ok(0f64);
        }
        let buf = self.take_array::<SIZE_DOUBLE>()?;
        Ok(f64::from_be_bytes(buf))
    }

    pub fn read_null(&mut self) -> SerialResult<()> {
        self.read_header(WireType::Null)?;
        Ok(())
    }

    pub fn read_string(&mut self) -> SerialResult<String> {
        let wire_type = self.peek_type();
        if !wire_type.is_string() {
            return Err(self.unexpected(WireType::StringAscii));
        }
        let len = self.read_length(wire_type, "String")?;
        if len == 0 {
            return Ok(String::new());
        }
        match wire_type {
            WireType::StringUtf8 => self.decode_utf8_string(len),
            _ => self.decode_ascii_string(len),
        }
    }

    /// Like [`Self::read_string`], but a null unit reads as `None`.
    pub fn read_opt_string(&mut self) -> SerialResult<Option<String>> {
        if self.peek_type() == WireType::Null {
            self.read_null()?;
            return Ok(None);
        }
        self.read_string().map(Some)
    }

    pub fn read_bytes(&mut self) -> SerialResult<Vec<u8>> {
        let len = self.read_length(WireType::ByteArray, "byte[]")?;
        let body = self.take(len)?;
        Ok(body.to_vec())
    }

    /// Like [`Self::read_bytes`], but a null unit reads as `None`.
    pub fn read_opt_bytes(&mut self) -> SerialResult<Option<Vec<u8>>> {
        if self.peek_type() == WireType::Null {
            self.read_null()?;
            return Ok(None);
        }
        self.read_bytes().map(Some)
    }
}

/* Object framing. */
impl<'a> SerialReader<'a> {
    /// Reads an object start marker of either kind and returns its version.
    /// A debug marker's class name is read and dropped.
    pub fn read_object_start(&mut self) -> SerialResult<u32> {
        Ok(self.read_debug_object_start()?.version)
    }

    pub fn read_debug_object_start(&mut self) -> SerialResult<ObjectStart> {
        let wire_type = match self.peek_type() {
            WireType::StartObjectDebug => WireType::StartObjectDebug,
            _ => WireType::StartObject,
        };
        let version = self.read_int_header(wire_type)?;
        let version = u32::try_from(version).map_err(|_| {
            SerialError::structural(format!(
                "Invalid version number found ({version}). Valid versions must not be negative."
            ))
        })?;
        let class_name = match wire_type {
            WireType::StartObjectDebug => Some(self.read_string()?),
            _ => None,
        };
        Ok(ObjectStart {
            version,
            class_name,
        })
    }

    pub fn read_object_end(&mut self) -> SerialResult<()> {
        self.read_header(WireType::EndObject)?;
        Ok(())
    }
}

/* Headers and payloads. */
impl<'a> SerialReader<'a> {
    /// Consumes a header of the expected type and returns its subtype.
    fn read_header(&mut self, expected: WireType) -> SerialResult<u8> {
        let header = match self.peek_header() {
            None => return Err(self.truncated(SIZE_BYTE)),
            Some(header) => header,
        };
        if header.wire_type() != expected {
            return Err(self.unexpected(expected));
        }
        self.pos += SIZE_BYTE;
        Ok(header.subtype())
    }

    /// The fault for a header that is not of the `expected` type.
    fn unexpected(&self, expected: WireType) -> SerialError {
        let position = self.pos;
        match self.peek_header() {
            None => self.truncated(SIZE_BYTE),
            Some(header) if header.wire_type() == WireType::EndObject => {
                SerialError::OptionalField { expected, position }
            }
            Some(header) => SerialError::TypeMismatch {
                expected,
                actual: header.tag(),
                position,
            },
        }
    }

    fn truncated(&self, needed: usize) -> SerialError {
        SerialError::Truncated {
            position: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }

    fn read_int_header(&mut self, expected: WireType) -> SerialResult<i32> {
        let subtype = self.read_header(expected)?;
        self.read_int_value(subtype)
    }

    fn read_int_value(&mut self, subtype: u8) -> SerialResult<i32> {
        match subtype {
            SUBTYPE_DEFAULT => Ok(0),
            SUBTYPE_BYTE => {
                let [byte] = self.take_array::<SIZE_BYTE>()?;
                Ok(byte as i32)
            }
            SUBTYPE_SHORT => {
                let buf = self.take_array::<SIZE_SHORT>()?;
                Ok(u16::from_be_bytes(buf) as i32)
            }
            SUBTYPE_INT => {
                let buf = self.take_array::<SIZE_INT>()?;
                Ok(i32::from_be_bytes(buf))
            }
            _ => Err(SerialError::structural(format!(
                "Invalid int subtype {subtype} at position {}.",
                self.pos - SIZE_BYTE
            ))),
        }
    }

    /// Longs not marked 8-byte wide went through the int scheme and are unsigned 32-bit.
    fn read_long_header(&mut self, expected: WireType) -> SerialResult<i64> {
        let subtype = self.read_header(expected)?;
        if subtype == SUBTYPE_LONG {
            let buf = self.take_array::<SIZE_LONG>()?;
            return Ok(i64::from_be_bytes(buf));
        }
        let int = self.read_int_value(subtype)?;
        Ok(int as u32 as i64)
    }

    fn read_length(&mut self, expected: WireType, what: &str) -> SerialResult<usize> {
        let len = self.read_int_header(expected)?;
        usize::try_from(len)
            .map_err(|_| SerialError::structural(format!("{what} length is negative: {len}.")))
    }

    fn take(&mut self, len: usize) -> SerialResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.truncated(len));
        }
        let buf: &'a [u8] = self.buf;
        let slice = &buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn take_array<const LEN: usize>(&mut self) -> SerialResult<[u8; LEN]> {
        let mut arr = [0u8; LEN];
        arr.copy_from_slice(self.take(LEN)?);
        Ok(arr)
    }
}

/* Strings. */
impl<'a> SerialReader<'a> {
    fn decode_ascii_string(&mut self, len: usize) -> SerialResult<String> {
        let body = self.take(len)?;
        if !body.is_ascii() {
            return Err(SerialError::structural(
                "Serialized ASCII string holds non-ASCII bytes.",
            ));
        }
        Ok(body.iter().map(|byte| *byte as char).collect())
    }

    /// `len` counts UTF-16 units; a 4-byte sequence accounts for two of them.
    fn decode_utf8_string(&mut self, len: usize) -> SerialResult<String> {
        let mut s = String::with_capacity(len.min(self.remaining()));
        let mut units = 0;
        while units < len {
            let [b1] = self.take_array::<1>()?;
            let (cp, units_len) = if b1 & 0x80 == 0 {
                (b1 as u32, 1)
            } else if b1 & 0xE0 == 0xC0 {
                let [b2] = self.take_continuations::<1>()?;
                (((b1 as u32 & 0x1F) << 6) | b2, 1)
            } else if b1 & 0xF0 == 0xE0 {
                let [b2, b3] = self.take_continuations::<2>()?;
                (((b1 as u32 & 0x0F) << 12) | (b2 << 6) | b3, 1)
            } else if b1 & 0xF8 == 0xF0 {
                let [b2, b3, b4] = self.take_continuations::<3>()?;
                (
                    ((b1 as u32 & 0x07) << 18) | (b2 << 12) | (b3 << 6) | b4,
                    2,
                )
            } else {
                return Err(Self::malformed_string());
            };
            let ch = char::from_u32(cp).ok_or_else(Self::malformed_string)?;
            s.push(ch);
            units += units_len;
        }
        if units != len {
            return Err(Self::malformed_string());
        }
        Ok(s)
    }

    /// Takes UTF-8 continuation bytes and strips their marker bits.
    fn take_continuations<const LEN: usize>(&mut self) -> SerialResult<[u32; LEN]> {
        let bytes = self.take_array::<LEN>()?;
        let mut conts = [0u32; LEN];
        for (cont, byte) in conts.iter_mut().zip(bytes) {
            if byte & 0xC0 != 0x80 {
                return Err(Self::malformed_string());
            }
            *cont = (byte & 0x3F) as u32;
        }
        Ok(conts)
    }

    fn malformed_string() -> SerialError {
        SerialError::structural("Serialized string is malformed.")
    }
}

use crate::serializers::{read_size, write_size};
use crate::{ObjectSerializer, Serializer, ValueSerializer, Valued, Versioned};
use serial_types::wire::{SerialReader, SerialWriter, WireType};
use serial_types::{SerialError, SerialResult, SerializationContext};
use std::any;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

pub const BYTE: Valued<ByteSerializer> = Valued(ByteSerializer);
pub const BOOLEAN: Valued<BooleanSerializer> = Valued(BooleanSerializer);
pub const SHORT: Valued<ShortSerializer> = Valued(ShortSerializer);
pub const INT: Valued<IntSerializer> = Valued(IntSerializer);
pub const CHAR: Valued<CharSerializer> = Valued(CharSerializer);
pub const LONG: Valued<LongSerializer> = Valued(LongSerializer);
pub const FLOAT: Valued<FloatSerializer> = Valued(FloatSerializer);
pub const DOUBLE: Valued<DoubleSerializer> = Valued(DoubleSerializer);
pub const STRING: Valued<StringSerializer> = Valued(StringSerializer);
pub const BYTES: Valued<BytesSerializer> = Valued(BytesSerializer);

pub const INT_ARRAY: Versioned<ArraySerializer<IntSerializer>> =
    Versioned(ArraySerializer(IntSerializer));
pub const LONG_ARRAY: Versioned<ArraySerializer<LongSerializer>> =
    Versioned(ArraySerializer(LongSerializer));
pub const FLOAT_ARRAY: Versioned<ArraySerializer<FloatSerializer>> =
    Versioned(ArraySerializer(FloatSerializer));
pub const DOUBLE_ARRAY: Versioned<ArraySerializer<DoubleSerializer>> =
    Versioned(ArraySerializer(DoubleSerializer));

pub const SIMPLE_VALUE: Versioned<SimpleValueSerializer> = Versioned(SimpleValueSerializer);

/* Single values. */

#[derive(Clone, Copy, Debug, Default)]
pub struct ByteSerializer;
impl ValueSerializer<u8> for ByteSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &u8,
    ) -> SerialResult<()> {
        w.write_byte(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<u8> {
        r.read_byte()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanSerializer;
impl ValueSerializer<bool> for BooleanSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &bool,
    ) -> SerialResult<()> {
        w.write_boolean(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<bool> {
        r.read_boolean()
    }
}

/// Shorts travel as ints.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShortSerializer;
impl ValueSerializer<i16> for ShortSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &i16,
    ) -> SerialResult<()> {
        w.write_int(*val as i32);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<i16> {
        let int = r.read_int()?;
        i16::try_from(int)
            .map_err(|_| SerialError::structural(format!("Value out of range of i16: {int}.")))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IntSerializer;
impl ValueSerializer<i32> for IntSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &i32,
    ) -> SerialResult<()> {
        w.write_int(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<i32> {
        r.read_int()
    }
}

/// Chars travel as ints holding the code point.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharSerializer;
impl ValueSerializer<char> for CharSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &char,
    ) -> SerialResult<()> {
        w.write_int(*val as u32 as i32);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<char> {
        let int = r.read_int()?;
        u32::try_from(int)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| SerialError::structural(format!("Invalid char code point: {int}.")))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LongSerializer;
impl ValueSerializer<i64> for LongSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &i64,
    ) -> SerialResult<()> {
        w.write_long(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<i64> {
        r.read_long()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FloatSerializer;
impl ValueSerializer<f32> for FloatSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &f32,
    ) -> SerialResult<()> {
        w.write_float(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<f32> {
        r.read_float()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleSerializer;
impl ValueSerializer<f64> for DoubleSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &f64,
    ) -> SerialResult<()> {
        w.write_double(*val);
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<f64> {
        r.read_double()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StringSerializer;
impl ValueSerializer<String> for StringSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &String,
    ) -> SerialResult<()> {
        w.write_string(val)?;
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<String> {
        r.read_string()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BytesSerializer;
impl ValueSerializer<Vec<u8>> for BytesSerializer {
    fn serialize_value(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &Vec<u8>,
    ) -> SerialResult<()> {
        w.write_bytes(val)?;
        Ok(())
    }

    fn deserialize_value(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Vec<u8>> {
        r.read_bytes()
    }
}

/* Arrays. */

/// A length-prefixed run of values, framed as an object.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArraySerializer<S>(pub S);
impl<E, S> ObjectSerializer<Vec<E>> for ArraySerializer<S>
where
    S: ValueSerializer<E>,
{
    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        vals: &Vec<E>,
    ) -> SerialResult<()> {
        write_size(w, vals.len())?;
        for val in vals.iter() {
            self.0.serialize_value(ctx, w, val)?;
        }
        Ok(())
    }

    fn deserialize_object(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<Vec<E>> {
        let size = read_size(r)?;
        let mut vals = Vec::with_capacity(size.min(r.remaining()));
        for _ in 0..size {
            vals.push(self.0.deserialize_value(ctx, r)?);
        }
        Ok(vals)
    }
}

/* Loosely typed values. */

/// One of the primitive kinds that can be told apart by wire type alone.
#[derive(PartialEq, Clone, Debug)]
pub enum SimpleValue {
    Str(String),
    Int(i32),
    Bool(bool),
    Double(f64),
    Float(f32),
    Long(i64),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleValueSerializer;
impl ObjectSerializer<SimpleValue> for SimpleValueSerializer {
    fn serialize_object(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &SimpleValue,
    ) -> SerialResult<()> {
        match val {
            SimpleValue::Str(v) => w.write_string(v)?,
            SimpleValue::Int(v) => w.write_int(*v),
            SimpleValue::Bool(v) => w.write_boolean(*v),
            SimpleValue::Double(v) => w.write_double(*v),
            SimpleValue::Float(v) => w.write_float(*v),
            SimpleValue::Long(v) => w.write_long(*v),
        };
        Ok(())
    }

    fn deserialize_object(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<SimpleValue> {
        let val = match r.peek_type() {
            WireType::StringAscii | WireType::StringUtf8 => SimpleValue::Str(r.read_string()?),
            WireType::Int => SimpleValue::Int(r.read_int()?),
            WireType::Boolean => SimpleValue::Bool(r.read_boolean()?),
            WireType::Double => SimpleValue::Double(r.read_double()?),
            WireType::Float => SimpleValue::Float(r.read_float()?),
            WireType::Long => SimpleValue::Long(r.read_long()?),
            wire_type => {
                return Err(SerialError::structural(format!(
                    "Unexpected type found in simple value deserialization: {wire_type}."
                )))
            }
        };
        Ok(val)
    }
}

/// Writes an enum by the name its `Display` gives, and parses it back with `FromStr`.
pub struct EnumSerializer<E>(PhantomData<fn() -> E>);

impl<E> EnumSerializer<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for EnumSerializer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> ObjectSerializer<E> for EnumSerializer<E>
where
    E: Display + FromStr,
{
    fn serialize_object(
        &self,
        _ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &E,
    ) -> SerialResult<()> {
        w.write_string(&val.to_string())?;
        Ok(())
    }

    fn deserialize_object(
        &self,
        _ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<E> {
        let name = r.read_string()?;
        name.parse().map_err(|_| {
            SerialError::structural(format!(
                "No variant of {} is named {name:?}.",
                any::type_name::<E>()
            ))
        })
    }
}

/// Writes nothing and reads every value as absent.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySerializer;
impl<T> Serializer<T> for EmptySerializer {
    fn serialize(
        &self,
        _ctx: &SerializationContext,
        _w: &mut SerialWriter,
        _val: Option<&T>,
    ) -> SerialResult<()> {
        Ok(())
    }

    fn deserialize(
        &self,
        _ctx: &SerializationContext,
        _r: &mut SerialReader,
    ) -> SerialResult<Option<T>> {
        Ok(None)
    }
}

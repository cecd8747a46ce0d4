use serial_types::wire::{SerialReader, SerialWriter, WireType};
use serial_types::{SerialError, SerialResult, SerializationContext};
use std::any;

/// Writes and reads values of one type. `None` stands for an absent value.
///
/// Implementations are normally not written by hand; see
/// [`crate::ObjectSerializer`], [`crate::BuilderSerializer`] and [`crate::ValueSerializer`].
pub trait Serializer<T> {
    fn serialize(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: Option<&T>,
    ) -> SerialResult<()>;

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<T>>;

    /// Like [`Self::deserialize`], but an absent value is a fault.
    fn deserialize_not_null(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<T> {
        self.deserialize(ctx, r)?.ok_or_else(|| {
            SerialError::structural(format!(
                "Expected a value of {} but found null.",
                any::type_name::<T>()
            ))
        })
    }
}

impl<T, S> Serializer<T> for &S
where
    S: Serializer<T> + ?Sized,
{
    fn serialize(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: Option<&T>,
    ) -> SerialResult<()> {
        (**self).serialize(ctx, w, val)
    }

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<T>> {
        (**self).deserialize(ctx, r)
    }
}

impl<T, S> Serializer<T> for Box<S>
where
    S: Serializer<T> + ?Sized,
{
    fn serialize(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: Option<&T>,
    ) -> SerialResult<()> {
        (**self).serialize(ctx, w, val)
    }

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<T>> {
        (**self).deserialize(ctx, r)
    }
}

/// Writes a null unit iff `val` is absent, and returns whether it did.
pub fn write_null_indicator<T>(w: &mut SerialWriter, val: Option<&T>) -> bool {
    match val {
        None => {
            w.write_null();
            true
        }
        Some(_) => false,
    }
}

/// Consumes a null unit if one is next, and returns whether it did.
pub fn read_null_indicator(r: &mut SerialReader) -> SerialResult<bool> {
    if r.peek_type() == WireType::Null {
        r.read_null()?;
        return Ok(true);
    }
    Ok(false)
}

/// The last path segment of a type's name, without generic arguments.
pub fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

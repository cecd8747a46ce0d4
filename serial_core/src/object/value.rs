use crate::{read_null_indicator, write_null_indicator, Serializer};
use serial_types::wire::{SerialReader, SerialWriter, WireType};
use serial_types::{SerialError, SerialResult, SerializationContext};

/// A serializer of small values whose layout never changes, e.g. numbers or points.
/// Values carry no framing and no version.
///
/// The first unit a value writes must not be null: it would read back as an absent value.
pub trait ValueSerializer<T> {
    fn serialize_value(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &T,
    ) -> SerialResult<()>;

    fn deserialize_value(&self, ctx: &SerializationContext, r: &mut SerialReader)
        -> SerialResult<T>;
}

/// Adapts a [`ValueSerializer`] into a [`Serializer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Valued<S>(pub S);

impl<T, S> Serializer<T> for Valued<S>
where
    S: ValueSerializer<T>,
{
    fn serialize(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: Option<&T>,
    ) -> SerialResult<()> {
        let val = match val {
            None => {
                write_null_indicator(w, val);
                return Ok(());
            }
            Some(val) => val,
        };
        let start = w.position();
        self.0.serialize_value(ctx, w, val)?;
        if w.peek_type_at_position(start) == WireType::Null {
            return Err(SerialError::NullAmbiguity);
        }
        Ok(())
    }

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<T>> {
        if read_null_indicator(r)? {
            return Ok(None);
        }
        self.0.deserialize_value(ctx, r).map(Some)
    }
}

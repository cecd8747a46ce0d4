use crate::object::{read_object, write_object};
use crate::{read_null_indicator, simple_type_name, write_null_indicator, Serializer};
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialError, SerialResult, SerializationContext};
use std::any;
use std::fmt::Debug;

/// Staging state for a `T` that is only constructed once all of its fields are known.
///
/// The `Debug` representation is what a failed [`Builder::finish`] reports.
pub trait Builder<T>: Debug + Sized {
    /// Whether [`Builder::build_object`] may be called. Checked after [`Builder::prepare_for_build`].
    fn is_valid(&self) -> bool {
        true
    }

    /// Sets derived fields right before validation.
    fn prepare_for_build(&mut self) {}

    fn build_object(self) -> T;

    fn finish(mut self) -> SerialResult<T> {
        self.prepare_for_build();
        if !self.is_valid() {
            return Err(SerialError::Validation(format!(
                "{}\n{:?}",
                any::type_name::<Self>(),
                self
            )));
        }
        Ok(self.build_object())
    }

    fn finish_or_none(self) -> Option<T> {
        self.finish().ok()
    }
}

/// A serializer of objects that are read into a [`Builder`] first.
///
/// Reading is tolerant: once the stream runs out of fields of the object,
/// the remaining fields keep the values the builder was created with.
pub trait BuilderSerializer<T> {
    type Builder: Builder<T>;

    /// The version this serializer writes, and the highest one it reads.
    fn version(&self) -> u32 {
        0
    }

    /// The class name written in the debug context.
    fn debug_name(&self) -> &str {
        simple_type_name::<Self>()
    }

    fn create_builder(&self) -> Self::Builder;

    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &T,
    ) -> SerialResult<()>;

    fn deserialize_to_builder(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        builder: &mut Self::Builder,
        version: u32,
    ) -> SerialResult<()>;
}

/// Adapts a [`BuilderSerializer`] into a [`Serializer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Built<S>(pub S);

impl<S> Built<S> {
    /// Reads one object into an existing builder. An absent object leaves it untouched.
    pub fn deserialize_into<T>(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        builder: &mut S::Builder,
    ) -> SerialResult<()>
    where
        S: BuilderSerializer<T>,
    {
        if read_null_indicator(r)? {
            return Ok(());
        }
        let s = &self.0;
        read_object(r, s.version(), |r, version| {
            read_fields::<T, S>(ctx, s, r, builder, version)
        })
    }
}

/// The only place where running out of fields is not a fault.
fn read_fields<T, S>(
    ctx: &SerializationContext,
    s: &S,
    r: &mut SerialReader,
    builder: &mut S::Builder,
    version: u32,
) -> SerialResult<()>
where
    S: BuilderSerializer<T>,
{
    match s.deserialize_to_builder(ctx, r, builder, version) {
        Err(e) if e.is_end_of_fields() => Ok(()),
        res => res,
    }
}

impl<T, S> Serializer<T> for Built<S>
where
    S: BuilderSerializer<T>,
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
        let s = &self.0;
        write_object(ctx, w, s.version(), s.debug_name(), |w| {
            s.serialize_object(ctx, w, val)
        })
    }

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<T>> {
        if read_null_indicator(r)? {
            return Ok(None);
        }
        let s = &self.0;
        let builder = read_object(r, s.version(), |r, version| {
            let mut builder = s.create_builder();
            read_fields::<T, S>(ctx, s, r, &mut builder, version)?;
            Ok(builder)
        })?;
        builder.finish().map(Some)
    }
}

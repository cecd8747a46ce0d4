//! Versioned object framing.
//!
//! An object is written as
//!
//! ```text
//! Null                                        // absent
//! | StartObject(version) Field* EndObject
//! | StartObjectDebug(version, name) Field* EndObject      // debug context only
//! ```
//!
//! A reader accepts any version up to the one its serializer declares, and hands the
//! version found in the stream to the field reading code.
//! Fields the reader does not read, e.g. ones appended by a newer writer, are skipped.

mod builder;
mod value;

pub use builder::*;
pub use value::*;

use crate::{read_null_indicator, simple_type_name, write_null_indicator, Serializer};
use serial_types::walker;
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialError, SerialResult, SerializationContext};

/// Frames `fields` as one object.
pub fn write_object<F>(
    ctx: &SerializationContext,
    w: &mut SerialWriter,
    version: u32,
    debug_name: &str,
    fields: F,
) -> SerialResult<()>
where
    F: FnOnce(&mut SerialWriter) -> SerialResult<()>,
{
    if ctx.is_debug() {
        w.write_debug_object_start(version, debug_name)?;
    } else {
        w.write_object_start(version)?;
    }
    fields(w)?;
    w.write_object_end();
    Ok(())
}

/// Reads one object framed by [`write_object`].
///
/// `fields` receives the version found in the stream. Whatever it leaves unread of the object
/// is skipped.
pub fn read_object<V, F>(r: &mut SerialReader, max_version: u32, fields: F) -> SerialResult<V>
where
    F: FnOnce(&mut SerialReader, u32) -> SerialResult<V>,
{
    let version = r.read_object_start()?;
    if version > max_version {
        return Err(SerialError::Version {
            found: version,
            max: max_version,
        });
    }
    let val = fields(r, version)?;
    walker::skip_remaining_fields(r)?;
    r.read_object_end()?;
    Ok(val)
}

/// A serializer of objects that are constructed directly from the fields read.
pub trait ObjectSerializer<T> {
    /// The version this serializer writes, and the highest one it reads.
    fn version(&self) -> u32 {
        0
    }

    /// The class name written in the debug context.
    fn debug_name(&self) -> &str {
        simple_type_name::<Self>()
    }

    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &T,
    ) -> SerialResult<()>;

    fn deserialize_object(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        version: u32,
    ) -> SerialResult<T>;
}

/// Adapts an [`ObjectSerializer`] into a [`Serializer`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Versioned<S>(pub S);

impl<T, S> Serializer<T> for Versioned<S>
where
    S: ObjectSerializer<T>,
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
        let val = read_object(r, s.version(), |r, version| {
            s.deserialize_object(ctx, r, version)
        })?;
        Ok(Some(val))
    }
}

use crate::object::{read_object, write_object};
use crate::{read_null_indicator, simple_type_name, write_null_indicator, Serializer};
use serial_types::walker;
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialError, SerialResult, SerializationContext};
use std::any;

/// One concrete kind of a base type `B`, e.g. one variant of an enum.
pub trait Variant<B> {
    fn name(&self) -> &str;

    /// Whether `val` is of this kind.
    fn matches(&self, val: &B) -> bool;

    fn serialize_variant(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &B,
    ) -> SerialResult<()>;

    fn deserialize_variant(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<B>;
}

/// A [`Variant`] made of a serializer for the inner value `V`,
/// and the two functions that take it out of, and put it into, a `B`.
pub struct VariantOf<B, V, S> {
    serializer: S,
    extract: fn(&B) -> Option<&V>,
    wrap: fn(V) -> B,
}

impl<B, V, S> VariantOf<B, V, S>
where
    S: Serializer<V>,
{
    pub fn new(serializer: S, extract: fn(&B) -> Option<&V>, wrap: fn(V) -> B) -> Self {
        Self {
            serializer,
            extract,
            wrap,
        }
    }
}

impl<B, V, S> Variant<B> for VariantOf<B, V, S>
where
    S: Serializer<V>,
{
    fn name(&self) -> &str {
        simple_type_name::<V>()
    }

    fn matches(&self, val: &B) -> bool {
        (self.extract)(val).is_some()
    }

    fn serialize_variant(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: &B,
    ) -> SerialResult<()> {
        let inner = (self.extract)(val)
            .ok_or_else(|| SerialError::UnregisteredVariant(self.name().to_owned()))?;
        self.serializer.serialize(ctx, w, Some(inner))
    }

    fn deserialize_variant(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<B> {
        let inner = self.serializer.deserialize_not_null(ctx, r)?;
        Ok((self.wrap)(inner))
    }
}

/// Serializes a base type `B` by writing the index of the matching variant, then the variant.
///
/// Indices are positions in the registry, so they must stay stable.
/// A variant that is no longer supported is replaced by [`BaseSerializer::retired`]:
/// data of that kind is then skipped and read as absent.
pub struct BaseSerializer<B> {
    variants: Vec<Option<Box<dyn Variant<B>>>>,
}

impl<B> Default for BaseSerializer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B> BaseSerializer<B> {
    pub fn new() -> Self {
        Self { variants: vec![] }
    }

    /// Registers the next variant.
    pub fn variant<V: Variant<B> + 'static>(mut self, variant: V) -> Self {
        self.variants.push(Some(Box::new(variant)));
        self
    }

    /// Reserves the next index for a variant that was removed.
    pub fn retired(mut self) -> Self {
        self.variants.push(None);
        self
    }

    fn index_of(&self, val: &B) -> Option<(usize, &dyn Variant<B>)> {
        self.variants
            .iter()
            .enumerate()
            .find_map(|(i, variant)| match variant {
                Some(variant) if variant.matches(val) => Some((i, variant.as_ref())),
                _ => None,
            })
    }
}

impl<B> Serializer<B> for BaseSerializer<B> {
    fn serialize(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        val: Option<&B>,
    ) -> SerialResult<()> {
        let val = match val {
            None => {
                write_null_indicator(w, val);
                return Ok(());
            }
            Some(val) => val,
        };
        let (i, variant) = self
            .index_of(val)
            .ok_or_else(|| SerialError::UnregisteredVariant(any::type_name::<B>().to_owned()))?;
        write_object(ctx, w, 0, simple_type_name::<Self>(), |w| {
            w.write_int(i as i32);
            variant.serialize_variant(ctx, w, val)
        })
    }

    fn deserialize(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
    ) -> SerialResult<Option<B>> {
        if read_null_indicator(r)? {
            return Ok(None);
        }
        read_object(r, 0, |r, _version| {
            let index = r.read_int()?;
            let variant = usize::try_from(index)
                .ok()
                .and_then(|i| self.variants.get(i))
                .ok_or_else(|| {
                    SerialError::structural(format!(
                        "Invalid type found in base type deserialization: {index}."
                    ))
                })?;
            match variant {
                None => {
                    walker::skip_object(r)?;
                    Ok(None)
                }
                Some(variant) => variant.deserialize_variant(ctx, r).map(Some),
            }
        })
    }
}

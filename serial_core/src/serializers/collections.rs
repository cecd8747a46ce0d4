use crate::serializers::{read_size, write_size};
use crate::{ObjectSerializer, Serializer, Versioned};
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialResult, SerializationContext};
use std::collections::{BTreeMap, BTreeSet};

/// Framed as an object: the element count, then each element.
pub fn list_serializer<S>(item: S) -> Versioned<ListSerializer<S>> {
    Versioned(ListSerializer(item))
}

pub fn set_serializer<S>(item: S) -> Versioned<SetSerializer<S>> {
    Versioned(SetSerializer(item))
}

/// Framed as an object: the entry count, then each key followed by its value.
pub fn map_serializer<KS, VS>(key: KS, value: VS) -> Versioned<MapSerializer<KS, VS>> {
    Versioned(MapSerializer(key, value))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ListSerializer<S>(pub S);
impl<T, S> ObjectSerializer<Vec<T>> for ListSerializer<S>
where
    S: Serializer<T>,
{
    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        items: &Vec<T>,
    ) -> SerialResult<()> {
        write_size(w, items.len())?;
        for item in items.iter() {
            self.0.serialize(ctx, w, Some(item))?;
        }
        Ok(())
    }

    fn deserialize_object(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<Vec<T>> {
        let size = read_size(r)?;
        let mut items = Vec::with_capacity(size.min(r.remaining()));
        for _ in 0..size {
            items.push(self.0.deserialize_not_null(ctx, r)?);
        }
        Ok(items)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SetSerializer<S>(pub S);
impl<T, S> ObjectSerializer<BTreeSet<T>> for SetSerializer<S>
where
    T: Ord,
    S: Serializer<T>,
{
    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        items: &BTreeSet<T>,
    ) -> SerialResult<()> {
        write_size(w, items.len())?;
        for item in items.iter() {
            self.0.serialize(ctx, w, Some(item))?;
        }
        Ok(())
    }

    fn deserialize_object(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<BTreeSet<T>> {
        let size = read_size(r)?;
        let mut items = BTreeSet::new();
        for _ in 0..size {
            items.insert(self.0.deserialize_not_null(ctx, r)?);
        }
        Ok(items)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MapSerializer<KS, VS>(pub KS, pub VS);
impl<K, V, KS, VS> ObjectSerializer<BTreeMap<K, V>> for MapSerializer<KS, VS>
where
    K: Ord,
    KS: Serializer<K>,
    VS: Serializer<V>,
{
    fn serialize_object(
        &self,
        ctx: &SerializationContext,
        w: &mut SerialWriter,
        entries: &BTreeMap<K, V>,
    ) -> SerialResult<()> {
        write_size(w, entries.len())?;
        for (key, val) in entries.iter() {
            self.0.serialize(ctx, w, Some(key))?;
            self.1.serialize(ctx, w, Some(val))?;
        }
        Ok(())
    }

    fn deserialize_object(
        &self,
        ctx: &SerializationContext,
        r: &mut SerialReader,
        _version: u32,
    ) -> SerialResult<BTreeMap<K, V>> {
        let size = read_size(r)?;
        let mut entries = BTreeMap::new();
        for _ in 0..size {
            let key = self.0.deserialize_not_null(ctx, r)?;
            let val = self.1.deserialize_not_null(ctx, r)?;
            entries.insert(key, val);
        }
        Ok(entries)
    }
}

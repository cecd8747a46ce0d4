use crate::ds_n_a::buffer_pool::BufferPool;
use crate::{SerialConfig, Serializer};
use serial_types::walker;
use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialError, SerialResult, SerializationContext};
use std::mem;
use std::sync::Arc;

/// Entry point that turns whole values into bytes and back.
///
/// Holds the context every call runs under, and optionally a pool of temp buffers.
/// A `Serial` is cheap to clone and may be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Serial {
    context: SerializationContext,
    pool: Option<Arc<BufferPool>>,
}

impl Serial {
    pub fn new(context: SerializationContext) -> Self {
        Self {
            context,
            pool: None,
        }
    }

    pub fn with_pool(context: SerializationContext, pool: Arc<BufferPool>) -> Self {
        Self {
            context,
            pool: Some(pool),
        }
    }

    pub fn from_config(config: &SerialConfig) -> Self {
        let pool = if config.buffer_count == 0 {
            None
        } else {
            let pool = BufferPool::with_buffers(config.buffer_count, config.buffer_size);
            Some(Arc::new(pool))
        };
        Self {
            context: config.context,
            pool,
        }
    }

    pub fn context(&self) -> &SerializationContext {
        &self.context
    }

    pub fn pool(&self) -> Option<&Arc<BufferPool>> {
        self.pool.as_ref()
    }

    /// Serializes `val`. An absent value serializes to no bytes at all.
    pub fn to_bytes<T, S>(&self, val: Option<&T>, serializer: &S) -> SerialResult<Vec<u8>>
    where
        S: Serializer<T> + ?Sized,
    {
        if val.is_none() {
            return Ok(vec![]);
        }
        let buf = self.pool.as_ref().and_then(|pool| pool.acquire());
        let w = match buf {
            Some(buf) => SerialWriter::with_buffer(buf),
            None => SerialWriter::new(),
        };
        let (res, buf) = self.write(val, serializer, w);
        if let Some(pool) = self.pool.as_ref() {
            pool.release(buf);
        }
        res
    }

    /// Like [`Serial::to_bytes`], but writes into `buf`.
    ///
    /// On return `buf` holds the buffer that was last written to,
    /// which is larger than the one passed in if the output did not fit.
    pub fn to_bytes_with_buffer<T, S>(
        &self,
        val: Option<&T>,
        serializer: &S,
        buf: &mut Vec<u8>,
    ) -> SerialResult<Vec<u8>>
    where
        S: Serializer<T> + ?Sized,
    {
        if val.is_none() {
            return Ok(vec![]);
        }
        let w = SerialWriter::with_buffer(mem::take(buf));
        let (res, grown) = self.write(val, serializer, w);
        *buf = grown;
        res
    }

    fn write<T, S>(
        &self,
        val: Option<&T>,
        serializer: &S,
        mut w: SerialWriter,
    ) -> (SerialResult<Vec<u8>>, Vec<u8>)
    where
        S: Serializer<T> + ?Sized,
    {
        let res = serializer
            .serialize(&self.context, &mut w, val)
            .map(|()| w.serialized_data());
        (res, w.into_buffer())
    }

    /// Deserializes one value from the start of `bytes`. No bytes deserialize to `None`.
    ///
    /// Any fault is wrapped in [`SerialError::Serialization`], together with a dump
    /// of `bytes` marking where reading stopped.
    /// The dump shows values only under the debug context.
    pub fn from_bytes<T, S>(&self, bytes: &[u8], serializer: &S) -> SerialResult<Option<T>>
    where
        S: Serializer<T> + ?Sized,
    {
        if bytes.is_empty() {
            return Ok(None);
        }
        let mut r = SerialReader::new(bytes);
        serializer.deserialize(&self.context, &mut r).map_err(|cause| {
            let position = r.position();
            let dump = walker::dump(bytes, Some(position), self.context.is_debug());
            tracing::debug!(position, %cause, "Failed to deserialize.");
            SerialError::Serialization {
                cause: Box::new(cause),
                dump,
            }
        })
    }
}

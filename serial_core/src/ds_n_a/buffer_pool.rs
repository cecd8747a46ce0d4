use std::sync::{Mutex, PoisonError};

mod test;

/// A bounded free list of byte buffers, shared by concurrent serialize calls.
///
/// A buffer is owned by exactly one caller between [`BufferPool::acquire`] and
/// [`BufferPool::release`].
/// A pool made with [`BufferPool::with_buffers`] cuts returned buffers back to their
/// original size, so a single large value does not pin memory.
#[derive(Debug)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    capacity: usize,
    buffer_size: Option<usize>,
}

impl BufferPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            buffer_size: None,
        }
    }

    /// A full pool of `count` zeroed buffers, each `size` bytes long.
    pub fn with_buffers(count: usize, size: usize) -> Self {
        let free = (0..count).map(|_| vec![0u8; size]).collect::<Vec<_>>();
        Self {
            free: Mutex::new(free),
            capacity: count,
            buffer_size: Some(size),
        }
    }

    pub fn acquire(&self) -> Option<Vec<u8>> {
        let buf = self.lock().pop();
        if buf.is_none() {
            tracing::trace!("Buffer pool is empty.");
        }
        buf
    }

    /// Returns `buf` to the pool. Returns false if the pool was full and `buf` was dropped.
    pub fn release(&self, mut buf: Vec<u8>) -> bool {
        if let Some(size) = self.buffer_size {
            if buf.len() > size {
                tracing::trace!(len = buf.len(), size, "Cutting back grown buffer.");
                buf.truncate(size);
                buf.shrink_to_fit();
            }
        }
        let mut free = self.lock();
        if free.len() >= self.capacity {
            tracing::trace!(len = buf.len(), "Buffer pool is full. Dropping buffer.");
            return false;
        }
        free.push(buf);
        true
    }

    /// Number of buffers currently available.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The size released buffers are cut back to, if any.
    pub fn buffer_size(&self) -> Option<usize> {
        self.buffer_size
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Vec<u8>>> {
        // A panicking holder cannot leave the list half-updated.
        self.free.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

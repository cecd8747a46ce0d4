use serial_types::wire::DEFAULT_BUFFER_SIZE;
use serial_types::SerializationContext;

/// How a [`crate::Serial`] is set up.
#[derive(Clone, Debug)]
pub struct SerialConfig {
    pub context: SerializationContext,

    /// Number of temp buffers to pool. Zero disables pooling.
    pub buffer_count: usize,

    /// Size of each pooled buffer. Buffers grow beyond it while in use,
    /// and are cut back to it when returned to the pool.
    pub buffer_size: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            context: SerializationContext::RELEASE,
            buffer_count: 0,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

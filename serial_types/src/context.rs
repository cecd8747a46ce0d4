/// Whether a serialize/deserialize call tree runs in debug or release mode.
///
/// The two modes are mutually exclusive and fixed for the duration of one call tree.
/// Debug mode stamps a human-readable type name next to each object start marker.
/// It never changes how field payloads are encoded.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default)]
pub enum SerializationContext {
    Debug,
    #[default]
    Release,
}

impl SerializationContext {
    pub const DEBUG: Self = Self::Debug;
    pub const RELEASE: Self = Self::Release;

    pub fn is_debug(&self) -> bool {
        *self == Self::Debug
    }

    pub fn is_release(&self) -> bool {
        *self == Self::Release
    }
}

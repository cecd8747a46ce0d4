use crate::wire::{TypeTag, WireType};
use thiserror::Error;

pub type SerialResult<T> = Result<T, SerialError>;

#[derive(Error, Debug)]
pub enum SerialError {
    /// Fewer bytes remain than a primitive read requires.
    #[error("Stream truncated at position {position}: {needed} bytes needed, {remaining} remaining.")]
    Truncated {
        position: usize,
        needed: usize,
        remaining: usize,
    },

    /// A field read ran into the end of the enclosing object.
    #[error("Expected object field of type {expected} but found the end of the object at position {position}.")]
    OptionalField { expected: WireType, position: usize },

    /// A header is present but of another type than the one expected.
    #[error("Expected value of type {expected} but found {actual} at position {position}.")]
    TypeMismatch {
        expected: WireType,
        actual: TypeTag,
        position: usize,
    },

    #[error("Version number found ({found}) is greater than the maximum supported value ({max}).")]
    Version { found: u32, max: u32 },

    #[error("{0}")]
    Structural(String),

    #[error("Values with null in the first field are ambiguous.")]
    NullAmbiguity,

    #[error("The builder configuration is invalid: {0}")]
    Validation(String),

    #[error("No serializer is registered for {0}.")]
    UnregisteredVariant(String),

    #[error("Invalid serialized data: {cause}\n{dump}")]
    Serialization {
        #[source]
        cause: Box<SerialError>,
        dump: String,
    },
}

impl SerialError {
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural(msg.into())
    }

    /// Whether this fault means "the object holds no more fields".
    ///
    /// Only the versioned object read boundary may act on this;
    /// everywhere else these faults are fatal like any other.
    pub fn is_end_of_fields(&self) -> bool {
        matches!(self, Self::OptionalField { .. } | Self::Truncated { .. })
    }
}

mod config;
pub mod ds_n_a;
mod object;
mod serial;
mod serializer;
pub mod serializers;

pub use config::*;
pub use object::*;
pub use serial::*;
pub use serializer::*;

pub use serial_types::{SerialError, SerialResult, SerializationContext};

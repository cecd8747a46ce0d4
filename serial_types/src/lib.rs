//! Wire format of the `serial` codec: the header scheme, the growable writer,
//! the cursor reader, the error taxonomy and the schema-free stream walker.

mod context;
mod error;
pub mod walker;
pub mod wire;

pub use context::*;
pub use error::*;

//! Ready-made serializers: primitives, arrays, collections and polymorphic base types.

mod collections;
mod polymorphic;
mod primitives;

pub use collections::*;
pub use polymorphic::*;
pub use primitives::*;

use serial_types::wire::{SerialReader, SerialWriter};
use serial_types::{SerialError, SerialResult};

/// Element counts are written as ints.
fn write_size(w: &mut SerialWriter, size: usize) -> SerialResult<()> {
    let size = i32::try_from(size)
        .map_err(|_| SerialError::structural(format!("Too many elements to serialize: {size}.")))?;
    w.write_int(size);
    Ok(())
}

fn read_size(r: &mut SerialReader) -> SerialResult<usize> {
    let size = r.read_int()?;
    usize::try_from(size)
        .map_err(|_| SerialError::structural(format!("Element count is negative: {size}.")))
}

//! Data structures.

pub mod buffer_pool;

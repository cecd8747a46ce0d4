mod compatibility;
mod entry_point;
mod fixtures;
mod pooling;

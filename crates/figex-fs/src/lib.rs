//! Atomic file placement for extracted and transformed assets.
//!
//! Every write lands in a temp file beside its target and is renamed into
//! place, so a concurrent reader of the output directory never observes a
//! half-written asset.

mod error;
mod primitives;

pub use error::{Error, Result};
pub use primitives::{
    AtomicWriteOptions, atomic_read, atomic_write, atomic_write_from, read_head, remove_file,
    rename_over,
};

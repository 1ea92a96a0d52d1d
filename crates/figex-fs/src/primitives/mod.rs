pub mod atomic_write;
pub mod rename;

pub use atomic_write::{Options as AtomicWriteOptions, atomic_read, atomic_write, atomic_write_from, read_head};
pub use rename::{remove_file, rename_over};

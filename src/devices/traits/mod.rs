//! Device traits
//!
//! Hardware-independent trait definitions for device drivers.

pub mod storage;

pub use storage::{BlockStorage, StorageError, MAX_TRANSFER_LEN};

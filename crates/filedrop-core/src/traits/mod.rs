//! Core traits defined in `filedrop-core` and implemented by other crates.

pub mod storage;

pub use storage::StorageProvider;

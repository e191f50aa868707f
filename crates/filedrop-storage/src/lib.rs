//! # filedrop-storage
//!
//! The flat on-disk file store behind FileDrop, plus the accounting that
//! keeps it under quota: a cached usage counter, an oldest-first eviction
//! pass, and collision-free name resolution.

pub mod eviction;
pub mod naming;
pub mod providers;
pub mod usage;

pub use eviction::{EvictedFile, EvictionPolicy, EvictionReport};
pub use naming::{NameResolver, secure_filename};
pub use providers::LocalStorageProvider;
pub use usage::UsageTracker;

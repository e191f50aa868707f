//! # filedrop-core
//!
//! Core crate for FileDrop. Contains the configuration schema, the
//! storage provider trait, byte-size formatting, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other FileDrop crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

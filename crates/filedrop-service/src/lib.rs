//! # filedrop-service
//!
//! Business logic service layer for FileDrop. The upload service runs the
//! capacity check, name resolution, write, accounting and eviction steps in
//! order; the download service resolves and streams stored files.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod file;

pub use context::RequestContext;
pub use file::{DownloadService, UploadService};

//! File services: upload and download.

pub mod download;
pub mod upload;

pub use download::{DownloadResult, DownloadService};
pub use upload::{UploadParams, UploadReceipt, UploadService};

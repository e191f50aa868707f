//! # filedrop-api
//!
//! HTTP layer for FileDrop built on Axum.
//!
//! Serves the upload page, accepts multipart uploads, streams downloads,
//! and exposes a health probe. Also owns error mapping and server bootstrap.

pub mod app;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;

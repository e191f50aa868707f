//! Custom Axum extractors.

pub mod site;

pub use site::SiteContext;

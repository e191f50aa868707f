//! Core value types shared across the FileDrop workspace.

pub mod size;

pub use size::format_size;

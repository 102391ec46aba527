//! Library interface for maa-setup
//!
//! Exposes the pipeline stages for integration tests: release lookup, asset
//! selection, cached download, archive routing, cleanup and reporting.

pub mod api;
pub mod assets;
pub mod cache;
pub mod clean;
pub mod colors;
pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod extract;
pub mod manifest;
pub mod platform;
pub mod progress;
pub mod report;

// Re-export commonly used items
pub use commands::{SetupOptions, SetupReport, setup};
pub use config::Layout;
pub use error::{Result, SetupError};

//! Statpub Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! upload validation rules shared across all statpub components.

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use validation::ValidationError;

//! Agent CLI Core Library
//!
//! This crate provides the foundational utilities shared by the bridge and
//! the command-line front end:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, BuildConfig, EngineConfig, LogFormat};
pub use error::{AppError, AppResult};

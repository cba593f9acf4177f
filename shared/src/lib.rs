//! Shared utilities and common types for the MailGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Language selection for human-readable output
//! - Access code format validation

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AccessPolicyConfig, AppConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig,
};
pub use types::Language;
pub use utils::validation;

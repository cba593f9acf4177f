//! # MailGate Core
//!
//! Domain layer for MailGate: access-code entities, the store abstraction,
//! the claim-or-check validator, retention sweeping, administrative
//! lifecycle operations, and verification-code extraction from message text.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;

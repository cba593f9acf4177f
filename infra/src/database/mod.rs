//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management
//! - The `access_codes` store with row-locking transactions

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCodeStore, MySqlCodeTransaction};

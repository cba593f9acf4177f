//! MySQL implementations of the core store traits

pub mod access_code_store;

pub use access_code_store::{MySqlCodeStore, MySqlCodeTransaction};

//! Repository interfaces and in-process implementations.

pub mod access_code;

pub use access_code::{CodeStore, CodeTransaction, InMemoryCodeStore, InMemoryTransaction};

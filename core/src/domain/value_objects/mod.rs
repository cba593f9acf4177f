//! Value objects returned by domain services.

pub mod code_summary;
pub mod verdict;

pub use code_summary::{CodeStatus, CodeSummary};
pub use verdict::{DenialReason, Verdict};

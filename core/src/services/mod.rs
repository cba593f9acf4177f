//! Business services containing domain logic and use cases.

pub mod access;
pub mod extraction;

// Re-export commonly used types
pub use access::{
    AccessPolicy, AccessService, Clock, CodeListing, LifecycleAdmin, ManualClock,
    RetentionSweeper, SweepOutcome, SystemClock, Validator,
};
pub use extraction::{
    extract, fetch_verification_code, find_verification_code, MailboxError, MailboxSource,
    MessagePart, PartKind,
};

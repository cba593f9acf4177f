//! Access code lifecycle services
//!
//! - `Validator` runs the atomic claim-or-check transaction
//! - `RetentionSweeper` purges rows past the retention horizon, throttled by a cooldown
//! - `LifecycleAdmin` adds, deletes, wipes and lists codes for operators
//! - `AccessService` is the request path: opportunistic sweep, then validation

mod admin;
mod clock;
mod config;
mod humanize;
mod service;
mod sweeper;
mod validator;

#[cfg(test)]
mod tests;

pub use admin::{CodeListing, CodeSummaries, LifecycleAdmin};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AccessPolicy;
pub use humanize::humanize_elapsed;
pub use service::AccessService;
pub use sweeper::{RetentionSweeper, SweepOutcome};
pub use validator::Validator;

//! Domain entities representing core business objects.

pub mod access_code;

#[cfg(test)]
mod tests;

pub use access_code::{
    AccessCode, CodeState, CODE_LENGTH, RETENTION_HOURS, REUSE_WINDOW_SECONDS,
    SWEEP_COOLDOWN_MINUTES,
};

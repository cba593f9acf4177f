//! Outcome of an access code validation.

use serde::{Deserialize, Serialize};

/// Why a validation did not grant access
///
/// `Rejected` deliberately covers both unknown and expired codes so the
/// caller cannot tell whether a code exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// Unknown code, malformed code, or reuse window lapsed
    Rejected,
    /// Store failed or timed out; nothing was granted
    StoreUnavailable,
}

/// Verdict of `Validator::validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Access granted; `first_use` is true only for the call that redeemed the code
    Granted { first_use: bool },
    /// Access denied
    Denied(DenialReason),
}

impl Verdict {
    /// Check if access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted { .. })
    }

    /// Check if this verdict redeemed the code
    pub fn is_first_use(&self) -> bool {
        matches!(self, Verdict::Granted { first_use: true })
    }

    /// Stable identifier for denied verdicts
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Verdict::Granted { .. } => None,
            Verdict::Denied(DenialReason::Rejected) => Some("ACCESS_DENIED"),
            Verdict::Denied(DenialReason::StoreUnavailable) => Some("STORE_UNAVAILABLE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_predicates() {
        let first = Verdict::Granted { first_use: true };
        let reuse = Verdict::Granted { first_use: false };
        let denied = Verdict::Denied(DenialReason::Rejected);

        assert!(first.is_granted() && first.is_first_use());
        assert!(reuse.is_granted() && !reuse.is_first_use());
        assert!(!denied.is_granted());
    }

    #[test]
    fn test_error_codes_are_distinguishable() {
        assert_eq!(Verdict::Granted { first_use: false }.error_code(), None);
        assert_eq!(
            Verdict::Denied(DenialReason::Rejected).error_code(),
            Some("ACCESS_DENIED")
        );
        assert_eq!(
            Verdict::Denied(DenialReason::StoreUnavailable).error_code(),
            Some("STORE_UNAVAILABLE")
        );
    }
}

//! Human-readable listing entry for operators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Redemption status as shown to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeStatus {
    /// Fresh or inside the reuse window
    Available,
    /// Reuse window has lapsed
    Expired,
}

impl CodeStatus {
    /// Marker used in listings
    pub fn icon(&self) -> &'static str {
        match self {
            CodeStatus::Available => "🔄",
            CodeStatus::Expired => "✅",
        }
    }
}

/// One line of `LifecycleAdmin::list_with_status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSummary {
    pub code: String,
    pub status: CodeStatus,
    /// Humanized time since first use, absent for fresh codes
    pub elapsed: Option<String>,
}

impl fmt::Display for CodeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.icon(), self.code)?;
        if let Some(elapsed) = &self.elapsed {
            write!(f, " • {}", elapsed)?;
        }
        Ok(())
    }
}

//! Mailbox contract and code retrieval over message parts

use std::borrow::Cow;

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use mg_shared::validation::mask_code;

use super::extractor::extract;

/// Content type of one message part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Plain,
    Markup,
}

/// One decoded-transfer-encoding part of a message, still in its charset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePart {
    pub kind: PartKind,
    /// Declared charset, e.g. `utf-8`; UTF-8 is assumed when absent
    pub charset: Option<String>,
    pub body: Vec<u8>,
}

impl MessagePart {
    /// Plain text part encoded as UTF-8
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Plain,
            charset: Some("utf-8".to_string()),
            body: text.into().into_bytes(),
        }
    }

    /// Markup part encoded as UTF-8
    pub fn markup(html: impl Into<String>) -> Self {
        Self {
            kind: PartKind::Markup,
            charset: Some("utf-8".to_string()),
            body: html.into().into_bytes(),
        }
    }

    /// Part with raw bytes in an explicit charset
    pub fn with_charset(kind: PartKind, charset: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            kind,
            charset: Some(charset.into()),
            body,
        }
    }

    /// Decode the body with its declared charset, replacing undecodable sequences
    ///
    /// Labels are resolved as a browser would (`cp1251`, `koi8-r`, `latin1`, ...).
    /// Unknown labels fall back to UTF-8.
    pub fn decode(&self) -> Cow<'_, str> {
        let label = self.charset.as_deref().map(str::trim).unwrap_or("utf-8");
        let encoding = Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            debug!(charset = label, "Unknown charset, decoding as UTF-8");
            UTF_8
        });

        let (text, _, had_errors) = encoding.decode(&self.body);
        if had_errors {
            debug!(charset = encoding.name(), "Message part contained undecodable bytes");
        }
        text
    }
}

/// Mailbox access errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MailboxError {
    #[error("Mailbox unavailable: {message}")]
    Unavailable { message: String },

    #[error("Mailbox authentication failed")]
    Authentication,

    #[error("Mailbox is empty")]
    Empty,
}

/// Source of the most recent inbound message
#[async_trait]
pub trait MailboxSource: Send + Sync {
    /// Parts of the newest message in arrival order
    async fn latest_message_parts(&self) -> Result<Vec<MessagePart>, MailboxError>;
}

/// Run the extractor over each part in order and return the first code found
pub fn find_verification_code(parts: &[MessagePart]) -> Option<String> {
    parts.iter().find_map(|part| extract(&part.decode()))
}

/// Fetch the latest message and extract its verification code
///
/// Mailbox failures are logged and reported as no code.
pub async fn fetch_verification_code<M: MailboxSource + ?Sized>(mailbox: &M) -> Option<String> {
    let parts = match mailbox.latest_message_parts().await {
        Ok(parts) => parts,
        Err(e) => {
            warn!(error = %e, event = "mailbox_fetch_failed", "Failed to read latest message");
            return None;
        }
    };

    match find_verification_code(&parts) {
        Some(code) => {
            info!(
                code = %mask_code(&code),
                part_count = parts.len(),
                event = "verification_code_extracted",
                "Verification code extracted from latest message"
            );
            Some(code)
        }
        None => {
            info!(
                part_count = parts.len(),
                event = "verification_code_missing",
                "No verification code in latest message"
            );
            None
        }
    }
}

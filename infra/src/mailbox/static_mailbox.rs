//! In-memory mailbox for development and tests

use async_trait::async_trait;
use tokio::sync::RwLock;

use mg_core::services::extraction::{MailboxError, MailboxSource, MessagePart};

/// Mailbox holding delivered messages in memory, newest last
#[derive(Default)]
pub struct StaticMailbox {
    messages: RwLock<Vec<Vec<MessagePart>>>,
}

impl StaticMailbox {
    /// Create an empty mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mailbox already holding one message
    pub fn with_message(parts: Vec<MessagePart>) -> Self {
        Self {
            messages: RwLock::new(vec![parts]),
        }
    }

    /// Deliver a message; it becomes the latest
    pub async fn deliver(&self, parts: Vec<MessagePart>) {
        self.messages.write().await.push(parts);
    }

    /// Number of delivered messages
    pub async fn message_count(&self) -> usize {
        self.messages.read().await.len()
    }
}

#[async_trait]
impl MailboxSource for StaticMailbox {
    async fn latest_message_parts(&self) -> Result<Vec<MessagePart>, MailboxError> {
        self.messages
            .read()
            .await
            .last()
            .cloned()
            .ok_or(MailboxError::Empty)
    }
}

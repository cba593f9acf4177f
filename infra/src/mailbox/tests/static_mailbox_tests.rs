//! Unit tests for the in-memory mailbox

use mg_core::services::extraction::{
    fetch_verification_code, MailboxError, MailboxSource, MessagePart,
};

use crate::mailbox::StaticMailbox;

#[tokio::test]
async fn test_empty_mailbox() {
    let mailbox = StaticMailbox::new();
    assert_eq!(
        mailbox.latest_message_parts().await.unwrap_err(),
        MailboxError::Empty
    );
    assert_eq!(fetch_verification_code(&mailbox).await, None);
}

#[tokio::test]
async fn test_latest_message_wins() {
    let mailbox = StaticMailbox::with_message(vec![MessagePart::plain("Code: 111111")]);
    mailbox
        .deliver(vec![
            MessagePart::plain("Welcome back"),
            MessagePart::markup("<td>Ваш код</td><td>264 810</td>"),
        ])
        .await;

    assert_eq!(mailbox.message_count().await, 2);
    assert_eq!(mailbox.latest_message_parts().await.unwrap().len(), 2);
    assert_eq!(fetch_verification_code(&mailbox).await.as_deref(), Some("264810"));
}

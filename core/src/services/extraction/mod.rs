//! Verification code extraction from inbound mail
//!
//! `extract` turns noisy message text (plain or markup) into a six-digit
//! code. The mailbox contract feeds it the parts of the latest message.

mod extractor;
mod mailbox;
mod normalize;

#[cfg(test)]
mod tests;

pub use extractor::{extract, CodePattern};
pub use mailbox::{
    fetch_verification_code, find_verification_code, MailboxError, MailboxSource, MessagePart,
    PartKind,
};
pub use normalize::{looks_like_markup, normalize};

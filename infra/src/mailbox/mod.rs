//! Mailbox sources implementing `MailboxSource`

pub mod static_mailbox;

#[cfg(test)]
mod tests;

pub use static_mailbox::StaticMailbox;

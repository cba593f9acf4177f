#[cfg(test)]
mod static_mailbox_tests;

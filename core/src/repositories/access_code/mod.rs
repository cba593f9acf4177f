pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::{InMemoryCodeStore, InMemoryTransaction};
pub use r#trait::{CodeStore, CodeTransaction};

#[cfg(test)]
mod tests;

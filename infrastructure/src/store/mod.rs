//! Session stores implementing the repository and content catalog ports.

mod json_store;
mod memory;

pub use json_store::{JsonSessionStore, StoreError};
pub use memory::InMemorySessionRepository;

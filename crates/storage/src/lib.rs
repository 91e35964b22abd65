pub mod book;
pub mod store;

pub use book::{EditError, RuleBook};
pub use store::{JsonFileStore, MemoryStore, RuleStore, RuleStoreError};

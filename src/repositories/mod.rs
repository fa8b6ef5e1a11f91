//! Repository layer for data access operations.
//!
//! Each entity gets a store-facing trait, a MongoDB implementation, and an
//! in-memory implementation for tests.

mod journal_entry_repo;
mod user_repo;

pub use journal_entry_repo::{
    InMemoryJournalEntryRepository, JOURNAL_ENTRY_COLLECTION, JournalEntryRepository,
    MongoJournalEntryRepository,
};
pub use user_repo::{
    InMemoryUserRepository, MongoUserRepository, USER_COLLECTION, UserRepository,
};

use std::sync::Arc;

use mongodb::Database;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap; the repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub journal_entries: Arc<dyn JournalEntryRepository>,
}

impl Repositories {
    /// Wires the MongoDB-backed repositories.
    pub fn mongo(db: &Database) -> Self {
        Self {
            users: Arc::new(MongoUserRepository::new(db)),
            journal_entries: Arc::new(MongoJournalEntryRepository::new(db)),
        }
    }

    /// Wires map-backed repositories; used by tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            journal_entries: Arc::new(InMemoryJournalEntryRepository::new()),
        }
    }
}

//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod journal_entry_service;
mod user_service;

pub use journal_entry_service::JournalEntryService;
pub use user_service::UserService;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Used as Axum router state; cloning is cheap since the underlying
/// repositories are shared behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub journal_entries: JournalEntryService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users.clone()),
            journal_entries: JournalEntryService::new(repos.journal_entries, repos.users),
        }
    }
}

//! Journal entry business logic.
//!
//! Entries are owned through the user's reference list, so create and
//! delete touch two documents: the entry itself and the owning user.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::error::{AppError, AppResult};
use crate::models::{JournalEntry, NewJournalEntry, UpdateJournalEntry, User};
use crate::repositories::{JournalEntryRepository, UserRepository};

#[derive(Clone)]
pub struct JournalEntryService {
    entries: Arc<dyn JournalEntryRepository>,
    users: Arc<dyn UserRepository>,
}

impl JournalEntryService {
    pub fn new(
        entries: Arc<dyn JournalEntryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { entries, users }
    }

    /// Lists a user's entries in reference-list order.
    pub async fn entries_for_user(&self, username: &str) -> AppResult<Vec<JournalEntry>> {
        let user = self.owning_user(username).await?;
        if user.journal_entries.is_empty() {
            return Ok(Vec::new());
        }
        self.entries.find_by_ids(&user.journal_entries).await
    }

    /// Creates an entry for a user and records the ownership reference.
    pub async fn create_entry(
        &self,
        username: &str,
        input: NewJournalEntry,
    ) -> AppResult<JournalEntry> {
        let mut user = self.owning_user(username).await?;

        let mut entry = JournalEntry::new(input);
        let id = self.entries.insert(&entry).await?;
        entry.id = Some(id);

        user.journal_entries.push(id);
        self.users.update(&user).await?;

        Ok(entry)
    }

    /// Fetches a single entry by id.
    pub async fn get_entry(&self, id: ObjectId) -> AppResult<JournalEntry> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| entry_not_found(id))
    }

    /// Applies a partial update to an entry. Blank fields in the update
    /// leave the stored values untouched.
    pub async fn update_entry(
        &self,
        id: ObjectId,
        update: UpdateJournalEntry,
    ) -> AppResult<JournalEntry> {
        let mut entry = self.get_entry(id).await?;
        entry.apply_update(update);
        self.entries.replace(&entry).await?;
        Ok(entry)
    }

    /// Deletes an entry and drops the owner's reference to it.
    ///
    /// Returns whether the entry document existed. The reference is
    /// removed even when the document was already gone, so a dangling
    /// reference cannot survive a delete.
    pub async fn delete_entry(&self, username: &str, id: ObjectId) -> AppResult<bool> {
        let mut user = self.owning_user(username).await?;

        let deleted = self.entries.delete_by_id(id).await?;

        if user.journal_entries.contains(&id) {
            user.journal_entries.retain(|entry_id| *entry_id != id);
            self.users.update(&user).await?;
        }

        Ok(deleted)
    }

    async fn owning_user(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "username".to_string(),
                value: username.to_string(),
            })
    }
}

fn entry_not_found(id: ObjectId) -> AppError {
    AppError::NotFound {
        entity: "journal entry".to_string(),
        field: "id".to_string(),
        value: id.to_hex(),
    }
}

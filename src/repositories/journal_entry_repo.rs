//! Journal entry persistence.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::{Collection, Database};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{AppError, AppResult};
use crate::models::JournalEntry;

/// Collection the entry documents live in.
pub const JOURNAL_ENTRY_COLLECTION: &str = "journal_entries";

/// Store-facing interface for journal entry documents.
#[async_trait]
pub trait JournalEntryRepository: Send + Sync {
    /// Inserts an entry and returns the assigned id.
    async fn insert(&self, entry: &JournalEntry) -> AppResult<ObjectId>;

    /// Finds an entry by id.
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<JournalEntry>>;

    /// Resolves a list of ids, preserving the requested order. Ids with no
    /// backing document are skipped.
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<JournalEntry>>;

    /// Replaces a stored entry document; the entry must have an id.
    async fn replace(&self, entry: &JournalEntry) -> AppResult<()>;

    /// Deletes an entry by id; returns whether a document was removed.
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<bool>;
}

/// MongoDB implementation of `JournalEntryRepository`.
#[derive(Clone)]
pub struct MongoJournalEntryRepository {
    collection: Collection<JournalEntry>,
}

impl MongoJournalEntryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(JOURNAL_ENTRY_COLLECTION),
        }
    }
}

#[async_trait]
impl JournalEntryRepository for MongoJournalEntryRepository {
    #[instrument(skip(self, entry), fields(title = %entry.title))]
    async fn insert(&self, entry: &JournalEntry) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(entry).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal {
                source: anyhow::anyhow!("inserted _id was not an ObjectId"),
            }
        })?;
        tracing::info!(entry_id = %id, "Journal entry created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<JournalEntry>> {
        let entry = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(entry)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<JournalEntry>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let found: Vec<JournalEntry> = cursor.try_collect().await?;

        // $in gives no ordering guarantee; restore the reference-list order.
        let mut by_id: HashMap<ObjectId, JournalEntry> = found
            .into_iter()
            .filter_map(|entry| entry.id.map(|id| (id, entry)))
            .collect();
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    #[instrument(skip(self, entry))]
    async fn replace(&self, entry: &JournalEntry) -> AppResult<()> {
        let id = entry.id.ok_or_else(|| AppError::BadRequest {
            message: "cannot replace an entry that has not been saved".to_string(),
        })?;
        self.collection
            .replace_one(doc! { "_id": id }, entry)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

/// In-memory implementation of `JournalEntryRepository` for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJournalEntryRepository {
    entries: Arc<RwLock<HashMap<ObjectId, JournalEntry>>>,
}

impl InMemoryJournalEntryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JournalEntryRepository for InMemoryJournalEntryRepository {
    async fn insert(&self, entry: &JournalEntry) -> AppResult<ObjectId> {
        let mut entries = self.entries.write().await;
        let id = ObjectId::new();
        let mut stored = entry.clone();
        stored.id = Some(id);
        entries.insert(id, stored);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<JournalEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<JournalEntry>> {
        let entries = self.entries.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| entries.get(id).cloned())
            .collect())
    }

    async fn replace(&self, entry: &JournalEntry) -> AppResult<()> {
        let id = entry.id.ok_or_else(|| AppError::BadRequest {
            message: "cannot replace an entry that has not been saved".to_string(),
        })?;
        let mut entries = self.entries.write().await;
        entries.insert(id, entry.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> AppResult<bool> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewJournalEntry;

    fn entry(title: &str) -> JournalEntry {
        JournalEntry::new(NewJournalEntry {
            title: title.to_string(),
            content: None,
        })
    }

    #[tokio::test]
    async fn test_in_memory_insert_and_find() {
        let repo = InMemoryJournalEntryRepository::new();
        let id = repo.insert(&entry("Day one")).await.unwrap();

        let found = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.title, "Day one");
        assert!(repo.find_by_id(ObjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_find_by_ids_preserves_order_and_skips_missing() {
        let repo = InMemoryJournalEntryRepository::new();
        let first = repo.insert(&entry("First")).await.unwrap();
        let second = repo.insert(&entry("Second")).await.unwrap();

        let found = repo
            .find_by_ids(&[second, ObjectId::new(), first])
            .await
            .unwrap();
        let titles: Vec<&str> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_in_memory_replace() {
        let repo = InMemoryJournalEntryRepository::new();
        let id = repo.insert(&entry("Draft")).await.unwrap();

        let mut stored = repo.find_by_id(id).await.unwrap().unwrap();
        stored.title = "Final".to_string();
        repo.replace(&stored).await.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().title, "Final");
    }

    #[tokio::test]
    async fn test_in_memory_delete() {
        let repo = InMemoryJournalEntryRepository::new();
        let id = repo.insert(&entry("Gone soon")).await.unwrap();

        assert!(repo.delete_by_id(id).await.unwrap());
        assert!(!repo.delete_by_id(id).await.unwrap());
    }
}

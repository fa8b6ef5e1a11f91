//! User persistence.
//!
//! `UserRepository` is the store-facing interface; `MongoUserRepository`
//! implements it over the `users` collection, and
//! `InMemoryUserRepository` backs tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::bson::oid::ObjectId;
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::error::{AppError, AppResult};
use crate::models::User;

/// Collection the user documents live in.
pub const USER_COLLECTION: &str = "users";

/// Store-facing interface for user documents.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns the assigned id.
    async fn insert(&self, user: &User) -> AppResult<ObjectId>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Returns every stored user.
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Replaces a stored user document; the user must have an id.
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Deletes a user by username; returns whether a document was removed.
    async fn delete_by_username(&self, username: &str) -> AppResult<bool>;
}

/// MongoDB implementation of `UserRepository`.
#[derive(Clone)]
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(USER_COLLECTION),
        }
    }

    /// Creates the unique username index. Run once at startup.
    pub async fn init_indexes(db: &Database) -> AppResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        db.collection::<User>(USER_COLLECTION)
            .create_index(index)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn insert(&self, user: &User) -> AppResult<ObjectId> {
        let result = self.collection.insert_one(user).await?;
        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::Internal {
                source: anyhow::anyhow!("inserted _id was not an ObjectId"),
            }
        })?;
        tracing::info!(user_id = %id, "User created");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = self
            .collection
            .find_one(doc! { "username": username })
            .await?;
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let cursor = self.collection.find(doc! {}).await?;
        let users = cursor.try_collect().await?;
        Ok(users)
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user.id.ok_or_else(|| AppError::BadRequest {
            message: "cannot update a user that has not been saved".to_string(),
        })?;
        self.collection
            .replace_one(doc! { "_id": id }, user)
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "username": username })
            .await?;
        Ok(result.deleted_count > 0)
    }
}

/// In-memory implementation of `UserRepository` for tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> AppResult<ObjectId> {
        let mut users = self.users.write().await;

        if users.values().any(|stored| stored.username == user.username) {
            return Err(AppError::Duplicate {
                entity: USER_COLLECTION.to_string(),
                field: "username".to_string(),
                value: user.username.clone(),
            });
        }

        let id = ObjectId::new();
        let mut stored = user.clone();
        stored.id = Some(id);
        users.insert(id, stored);
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(all)
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let id = user.id.ok_or_else(|| AppError::BadRequest {
            message: "cannot update a user that has not been saved".to_string(),
        })?;
        let mut users = self.users.write().await;
        users.insert(id, user.clone());
        Ok(())
    }

    async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        let mut users = self.users.write().await;
        let id = users
            .values()
            .find(|user| user.username == username)
            .and_then(|user| user.id);
        Ok(match id {
            Some(id) => users.remove(&id).is_some(),
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewUser, ROLE_USER};

    fn user(name: &str) -> User {
        User::new(
            NewUser {
                username: name.to_string(),
                password: "pw".to_string(),
            },
            vec![ROLE_USER.to_string()],
        )
    }

    #[tokio::test]
    async fn test_in_memory_insert_and_find() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&user("alice")).await.unwrap();

        let found = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.username, "alice");
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_in_memory_rejects_duplicate_username() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("alice")).await.unwrap();

        let result = repo.insert(&user("alice")).await;
        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_in_memory_update_replaces_document() {
        let repo = InMemoryUserRepository::new();
        let id = repo.insert(&user("alice")).await.unwrap();

        let mut stored = repo.find_by_username("alice").await.unwrap().unwrap();
        stored.journal_entries.push(ObjectId::new());
        repo.update(&stored).await.unwrap();

        let reloaded = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(reloaded.id, Some(id));
        assert_eq!(reloaded.journal_entries.len(), 1);
    }

    #[tokio::test]
    async fn test_in_memory_delete() {
        let repo = InMemoryUserRepository::new();
        repo.insert(&user("alice")).await.unwrap();

        assert!(repo.delete_by_username("alice").await.unwrap());
        assert!(!repo.delete_by_username("alice").await.unwrap());
    }

    #[tokio::test]
    async fn test_in_memory_update_requires_id() {
        let repo = InMemoryUserRepository::new();
        let result = repo.update(&user("alice")).await;
        assert!(matches!(result, Err(AppError::BadRequest { .. })));
    }
}

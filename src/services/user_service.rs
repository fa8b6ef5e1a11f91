//! User business logic.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewUser, ROLE_ADMIN, ROLE_USER, User};
use crate::repositories::UserRepository;

/// User service for handling user-related business logic.
///
/// Decides the role set for new users; everything else is a thin pass
/// through to the repository.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Returns every stored user; empty when none exist.
    pub async fn get_all(&self) -> AppResult<Vec<User>> {
        self.repo.find_all().await
    }

    /// Persists a self-registered user with the default role.
    ///
    /// A duplicate username propagates as a `Duplicate` error.
    pub async fn save_new_user(&self, input: NewUser) -> AppResult<User> {
        self.save_with_roles(input, vec![ROLE_USER.to_string()]).await
    }

    /// Persists an admin-created user with elevated roles.
    pub async fn save_admin(&self, input: NewUser) -> AppResult<User> {
        self.save_with_roles(
            input,
            vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()],
        )
        .await
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.repo.find_by_username(username).await
    }

    /// Removes a user; returns whether one existed.
    pub async fn delete_by_username(&self, username: &str) -> AppResult<bool> {
        self.repo.delete_by_username(username).await
    }

    async fn save_with_roles(&self, input: NewUser, roles: Vec<String>) -> AppResult<User> {
        let mut user = User::new(input, roles);
        let id = self.repo.insert(&user).await?;
        user.id = Some(id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn input(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_new_user_gets_default_role() {
        let service = service();
        let user = service.save_new_user(input("alice")).await.unwrap();

        assert!(user.id.is_some());
        assert_eq!(user.roles, vec![ROLE_USER.to_string()]);
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_save_admin_gets_elevated_roles() {
        let service = service();
        let admin = service.save_admin(input("root")).await.unwrap();

        assert!(admin.is_admin());
        assert_eq!(
            admin.roles,
            vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()]
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_propagates() {
        let service = service();
        service.save_new_user(input("alice")).await.unwrap();

        let result = service.save_new_user(input("alice")).await;
        assert!(matches!(result, Err(AppError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn test_get_all_returns_every_user() {
        let service = service();
        assert!(service.get_all().await.unwrap().is_empty());

        service.save_new_user(input("alice")).await.unwrap();
        service.save_admin(input("root")).await.unwrap();

        let all = service.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_username() {
        let service = service();
        service.save_new_user(input("alice")).await.unwrap();

        assert!(service.delete_by_username("alice").await.unwrap());
        assert!(!service.delete_by_username("alice").await.unwrap());
    }
}

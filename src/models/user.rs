use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Role granted to self-registered users.
pub const ROLE_USER: &str = "USER";
/// Role granted through the admin creation endpoint.
pub const ROLE_ADMIN: &str = "ADMIN";

/// User document persisted in the `users` collection.
///
/// Ownership of journal entries lives on the user side: `journal_entries`
/// holds the ids of the entry documents this user created. The username is
/// unique, enforced by an index created at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Document id, assigned by the store on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub journal_entries: Vec<ObjectId>,
}

/// Input shape for creating a user. The role set is decided by the service,
/// not the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl User {
    /// Builds an unsaved user document with the given roles and no entries.
    pub fn new(input: NewUser, roles: Vec<String>) -> Self {
        Self {
            id: None,
            username: input.username,
            password: input.password,
            roles,
            journal_entries: Vec::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == ROLE_ADMIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_new_user_has_no_id_or_entries() {
        let user = User::new(sample_input(), vec![ROLE_USER.to_string()]);
        assert!(user.id.is_none());
        assert!(user.journal_entries.is_empty());
        assert_eq!(user.roles, vec![ROLE_USER.to_string()]);
    }

    #[test]
    fn test_is_admin() {
        let regular = User::new(sample_input(), vec![ROLE_USER.to_string()]);
        assert!(!regular.is_admin());

        let admin = User::new(
            sample_input(),
            vec![ROLE_USER.to_string(), ROLE_ADMIN.to_string()],
        );
        assert!(admin.is_admin());
    }

    #[test]
    fn test_unsaved_id_is_skipped_in_serialization() {
        let user = User::new(sample_input(), vec![ROLE_USER.to_string()]);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("_id").is_none());
    }

    #[test]
    fn test_deserialize_defaults_missing_collections() {
        let user: User =
            serde_json::from_str(r#"{"username": "bob", "password": "pw"}"#).unwrap();
        assert!(user.roles.is_empty());
        assert!(user.journal_entries.is_empty());
    }
}

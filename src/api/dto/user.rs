//! User-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{NewUser, User};

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a user (public registration and admin
/// creation share this shape; the role is decided server-side).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "Username must not be empty"))]
    #[schema(min_length = 1)]
    pub username: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    #[schema(format = "password", min_length = 1)]
    pub password: String,
}

impl CreateUserRequest {
    /// Converts the request DTO into a NewUser model.
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            username: self.username,
            password: self.password,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for user data (excludes the password).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    /// Document id as a 24-hex-char string
    pub id: String,
    pub username: String,
    pub roles: Vec<String>,
    /// Ids of the journal entries this user owns
    pub journal_entries: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
            roles: user.roles,
            journal_entries: user
                .journal_entries
                .iter()
                .map(|id| id.to_hex())
                .collect(),
        }
    }
}

/// Fixed-message confirmation payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ROLE_USER;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_blank_username_fails_validation() {
        let request = CreateUserRequest {
            username: String::new(),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_valid_request_converts() {
        let request = CreateUserRequest {
            username: "alice".to_string(),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_ok());
        let new_user = request.into_new_user();
        assert_eq!(new_user.username, "alice");
    }

    #[test]
    fn test_response_id_is_24_hex_chars() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "alice".to_string(),
            password: "pw".to_string(),
            roles: vec![ROLE_USER.to_string()],
            journal_entries: vec![ObjectId::new()],
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();

        let id = json["id"].as_str().unwrap();
        assert_eq!(id.len(), 24);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let entry_id = json["journal_entries"][0].as_str().unwrap();
        assert_eq!(entry_id.len(), 24);
    }

    #[test]
    fn test_response_omits_password() {
        let user = User {
            id: Some(ObjectId::new()),
            username: "alice".to_string(),
            password: "do-not-leak".to_string(),
            roles: Vec::new(),
            journal_entries: Vec::new(),
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("password").is_none());
    }
}

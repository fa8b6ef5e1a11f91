//! Translation of MongoDB driver errors into `AppError`.
//!
//! The interesting case is the duplicate-key write error (code 11000),
//! which carries the violated index and key in its server message and maps
//! to `AppError::Duplicate`. Everything else becomes a `Database` error
//! with operation context.

use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};

use crate::error::AppError;

/// Server error code for unique index violations.
const DUPLICATE_KEY_CODE: i32 = 11000;

pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a MongoDB driver error, attaching the operation name for
    /// context when no more specific mapping applies.
    pub fn convert_mongo_error(error: MongoError, operation: &str) -> AppError {
        let duplicate_message = match &*error.kind {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                Some(write_error.message.clone())
            }
            ErrorKind::Command(command_error)
                if command_error.code == DUPLICATE_KEY_CODE =>
            {
                Some(command_error.message.clone())
            }
            _ => None,
        };

        if let Some(message) = duplicate_message {
            return Self::duplicate_from_message(&message);
        }

        AppError::Database {
            operation: operation.to_string(),
            source: anyhow::Error::new(error),
        }
    }

    /// Builds a `Duplicate` error from a server duplicate-key message of
    /// the shape:
    /// `E11000 duplicate key error collection: db.users index: username_1
    /// dup key: { username: "alice" }`
    fn duplicate_from_message(message: &str) -> AppError {
        let entity = Self::token_after(message, "collection: ")
            .and_then(|name| name.rsplit('.').next())
            .unwrap_or("document")
            .to_string();
        let field = Self::token_after(message, "index: ")
            .map(Self::strip_index_suffix)
            .unwrap_or("unknown")
            .to_string();
        let value = Self::quoted_value(message).unwrap_or_default();

        AppError::Duplicate {
            entity,
            field,
            value,
        }
    }

    /// Returns the whitespace-delimited token following `marker`.
    fn token_after<'a>(message: &'a str, marker: &str) -> Option<&'a str> {
        let start = message.find(marker)? + marker.len();
        message[start..].split_whitespace().next()
    }

    /// Drops the direction suffix from an index name (`username_1` →
    /// `username`).
    fn strip_index_suffix(index: &str) -> &str {
        index
            .rsplit_once('_')
            .map(|(field, _)| field)
            .unwrap_or(index)
    }

    /// Extracts the first double-quoted value from the dup-key document.
    fn quoted_value(message: &str) -> Option<String> {
        let start = message.find('"')? + 1;
        let end = message[start..].find('"')? + start;
        Some(message[start..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUP_MESSAGE: &str = "E11000 duplicate key error collection: journal.users \
         index: username_1 dup key: { username: \"alice\" }";

    #[test]
    fn test_duplicate_message_is_parsed() {
        let error = DatabaseErrorConverter::duplicate_from_message(DUP_MESSAGE);
        match error {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "username");
                assert_eq!(value, "alice");
            }
            other => panic!("Expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_message_falls_back() {
        let error = DatabaseErrorConverter::duplicate_from_message("duplicate key");
        match error {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "document");
                assert_eq!(field, "unknown");
                assert!(value.is_empty());
            }
            other => panic!("Expected Duplicate, got {:?}", other),
        }
    }

    #[test]
    fn test_strip_index_suffix() {
        assert_eq!(DatabaseErrorConverter::strip_index_suffix("username_1"), "username");
        assert_eq!(DatabaseErrorConverter::strip_index_suffix("plain"), "plain");
    }
}

//! Journal-entry DTOs for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{JournalEntry, NewJournalEntry, UpdateJournalEntry};

/// Request body for creating a journal entry.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateJournalEntryRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    #[schema(min_length = 1)]
    pub title: String,
    pub content: Option<String>,
}

impl CreateJournalEntryRequest {
    pub fn into_new_entry(self) -> NewJournalEntry {
        NewJournalEntry {
            title: self.title,
            content: self.content,
        }
    }
}

/// Request body for updating a journal entry. Omitted or blank fields
/// leave the stored values untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateJournalEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl UpdateJournalEntryRequest {
    pub fn into_update(self) -> UpdateJournalEntry {
        UpdateJournalEntry {
            title: self.title,
            content: self.content,
        }
    }
}

/// Response body for a journal entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct JournalEntryResponse {
    /// Document id as a 24-hex-char string
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Creation timestamp, ISO-8601
    pub date: DateTime<Utc>,
}

impl From<JournalEntry> for JournalEntryResponse {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: entry.title,
            content: entry.content,
            date: entry.date,
        }
    }
}

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Journal entry document persisted in the `journal_entries` collection.
///
/// The title is required: a document without one fails deserialization.
/// `date` is stamped when the entry is created and serializes as an
/// ISO-8601 datetime on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Document id, assigned by the store on insert.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub date: DateTime<Utc>,
}

/// Input shape for creating an entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: Option<String>,
}

/// Partial update for an entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJournalEntry {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl JournalEntry {
    /// Builds an unsaved entry stamped with the current time.
    pub fn new(input: NewJournalEntry) -> Self {
        Self {
            id: None,
            title: input.title,
            content: input.content,
            date: Utc::now(),
        }
    }

    /// Applies a partial update. Blank title or content values leave the
    /// stored field untouched.
    pub fn apply_update(&mut self, update: UpdateJournalEntry) {
        if let Some(title) = update.title {
            if !title.trim().is_empty() {
                self.title = title;
            }
        }
        if let Some(content) = update.content {
            if !content.is_empty() {
                self.content = Some(content);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> JournalEntry {
        JournalEntry::new(NewJournalEntry {
            title: "First entry".to_string(),
            content: Some("Started journaling today.".to_string()),
        })
    }

    #[test]
    fn test_missing_title_fails_deserialization() {
        let result: Result<JournalEntry, _> =
            serde_json::from_str(r#"{"content": "no title", "date": "2024-01-01T12:00:00Z"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_is_optional() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"title": "Short day", "date": "2024-01-01T12:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(entry.title, "Short day");
        assert!(entry.content.is_none());
    }

    #[test]
    fn test_date_serializes_as_iso8601() {
        let entry: JournalEntry = serde_json::from_str(
            r#"{"title": "Short day", "date": "2024-01-01T12:00:00Z"}"#,
        )
        .unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        let date = json["date"].as_str().unwrap();
        assert!(date.starts_with("2024-01-01T12:00:00"));
    }

    #[test]
    fn test_apply_update_overwrites_fields() {
        let mut entry = sample_entry();
        entry.apply_update(UpdateJournalEntry {
            title: Some("Renamed".to_string()),
            content: Some("New content".to_string()),
        });
        assert_eq!(entry.title, "Renamed");
        assert_eq!(entry.content.as_deref(), Some("New content"));
    }

    #[test]
    fn test_apply_update_ignores_blank_values() {
        let mut entry = sample_entry();
        let original_content = entry.content.clone();
        entry.apply_update(UpdateJournalEntry {
            title: Some("   ".to_string()),
            content: Some(String::new()),
        });
        assert_eq!(entry.title, "First entry");
        assert_eq!(entry.content, original_content);
    }

    #[test]
    fn test_apply_update_empty_is_noop() {
        let mut entry = sample_entry();
        let before = entry.clone();
        entry.apply_update(UpdateJournalEntry::default());
        assert_eq!(entry, before);
    }
}

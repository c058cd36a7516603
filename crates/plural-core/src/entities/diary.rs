//! Diary entry entity - free-form journal text written by a member

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::MemberId;

/// Diary entry with the author's current name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: i64,
    pub member_id: MemberId,
    pub member_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of a diary entry
///
/// `None` leaves a field as it is. An empty title removes the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl DiaryUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Reject updates that would leave the entry without content
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.content {
            Some(content) => validate_diary_content(content),
            None => Ok(()),
        }
    }
}

/// Diary content must contain something other than whitespace
pub fn validate_diary_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "diary entry content cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Normalize a title; blank titles are stored as no title
pub fn normalize_diary_title(title: Option<&str>) -> Option<&str> {
    title.map(str::trim).filter(|t| !t.is_empty())
}

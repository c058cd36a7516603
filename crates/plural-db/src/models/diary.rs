//! Diary entry database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for diary_entries joined with the author's name
#[derive(Debug, Clone, FromRow)]
pub struct DiaryEntryModel {
    pub id: i64,
    pub member_id: i64,
    pub member_name: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

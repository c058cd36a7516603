//! Member database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub name: String,
    pub pronouns: Option<String>,
    pub avatar_path: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub remote_id: Option<String>,
    /// JSON array of `{prefix, suffix}` objects
    pub proxy_tags: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub member_id: i64,
    pub message: String,
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
}

//! SQLite implementation of MessageRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use plural_core::entities::Message;
use plural_core::traits::{MessageRepository, RepoResult};
use plural_core::value_objects::MemberId;

use crate::models::MessageModel;

use super::error::{map_db_error, map_foreign_key_violation, member_not_found};

/// SQLite implementation of MessageRepository
#[derive(Clone)]
pub struct SqliteMessageRepository {
    pool: SqlitePool,
}

impl SqliteMessageRepository {
    /// Create a new SqliteMessageRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    #[instrument(skip(self, text))]
    async fn create(
        &self,
        member_id: MemberId,
        text: &str,
        timestamp: &str,
    ) -> RepoResult<Message> {
        let exists = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS(SELECT 1 FROM members WHERE id = ?)",
        )
        .bind(member_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if exists == 0 {
            return Err(member_not_found(member_id));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO messages (member_id, message, timestamp, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(member_id.into_inner())
        .bind(text)
        .bind(timestamp)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || member_not_found(member_id)))?;

        let id = result.last_insert_rowid();
        debug!(message_id = id, member_id = %member_id, "message stored");

        Ok(Message {
            id,
            member_id,
            text: text.to_string(),
            timestamp: timestamp.to_string(),
            created_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn recent(&self, limit: i64) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(
            r#"
            SELECT id, member_id, message, timestamp, created_at
            FROM messages
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

//! SQLite implementation of DiaryRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

use plural_core::entities::{normalize_diary_title, validate_diary_content, DiaryEntry, DiaryUpdate};
use plural_core::error::DomainError;
use plural_core::traits::{DiaryRepository, RepoResult};
use plural_core::value_objects::MemberId;

use crate::models::DiaryEntryModel;

use super::error::{map_db_error, map_foreign_key_violation, member_not_found};

const SELECT_ENTRY: &str = r#"
    SELECT d.id, d.member_id, m.name AS member_name, d.title, d.content,
           d.created_at, d.updated_at
    FROM diary_entries d
    JOIN members m ON d.member_id = m.id
"#;

/// SQLite implementation of DiaryRepository
#[derive(Clone)]
pub struct SqliteDiaryRepository {
    pool: SqlitePool,
}

impl SqliteDiaryRepository {
    /// Create a new SqliteDiaryRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn diary_entry_not_found(id: i64) -> DomainError {
    DomainError::DiaryEntryNotFound(id)
}

#[async_trait]
impl DiaryRepository for SqliteDiaryRepository {
    #[instrument(skip(self, title, content))]
    async fn create(
        &self,
        member_id: MemberId,
        title: Option<&str>,
        content: &str,
    ) -> RepoResult<DiaryEntry> {
        validate_diary_content(content)?;

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
            INSERT INTO diary_entries (member_id, title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(member_id.into_inner())
        .bind(normalize_diary_title(title))
        .bind(content)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || member_not_found(member_id)))?;

        let id = result.last_insert_rowid();
        debug!(entry_id = id, member_id = %member_id, "diary entry stored");

        self.find_by_id(id)
            .await?
            .ok_or_else(|| diary_entry_not_found(id))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiaryEntry>> {
        let result = sqlx::query_as::<_, DiaryEntryModel>(&format!("{SELECT_ENTRY} WHERE d.id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(DiaryEntry::from))
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        member_id: Option<MemberId>,
        limit: Option<i64>,
    ) -> RepoResult<Vec<DiaryEntry>> {
        // A negative LIMIT means no limit in SQLite
        let results = sqlx::query_as::<_, DiaryEntryModel>(&format!(
            "{SELECT_ENTRY} WHERE (?1 IS NULL OR d.member_id = ?1) \
             ORDER BY d.created_at DESC, d.id DESC LIMIT ?2"
        ))
        .bind(member_id.map(MemberId::into_inner))
        .bind(limit.map_or(-1, |n| n.max(0)))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DiaryEntry::from).collect())
    }

    #[instrument(skip(self, update))]
    async fn update(&self, id: i64, update: &DiaryUpdate) -> RepoResult<DiaryEntry> {
        update.validate()?;
        if update.is_empty() {
            return self
                .find_by_id(id)
                .await?
                .ok_or_else(|| diary_entry_not_found(id));
        }

        let result = sqlx::query(
            r#"
            UPDATE diary_entries
            SET title = CASE WHEN ?1 THEN ?2 ELSE title END,
                content = COALESCE(?3, content),
                updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(update.title.is_some())
        .bind(normalize_diary_title(update.title.as_deref()))
        .bind(update.content.as_deref())
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(diary_entry_not_found(id));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| diary_entry_not_found(id))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM diary_entries WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(diary_entry_not_found(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search(
        &self,
        term: &str,
        member_id: Option<MemberId>,
    ) -> RepoResult<Vec<DiaryEntry>> {
        let results = sqlx::query_as::<_, DiaryEntryModel>(&format!(
            "{SELECT_ENTRY} WHERE (instr(lower(d.content), lower(?1)) > 0 \
                OR instr(lower(COALESCE(d.title, '')), lower(?1)) > 0) \
             AND (?2 IS NULL OR d.member_id = ?2) \
             ORDER BY d.created_at DESC, d.id DESC"
        ))
        .bind(term)
        .bind(member_id.map(MemberId::into_inner))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(DiaryEntry::from).collect())
    }
}

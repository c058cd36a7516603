//! Diary service
//!
//! Journal entries written by members. Only the SQLite backend keeps them.

use plural_core::entities::{DiaryEntry, DiaryUpdate};
use plural_core::traits::DiaryRepository;
use plural_core::value_objects::MemberId;
use plural_core::DomainError;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Diary service
pub struct DiaryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> DiaryService<'a> {
    /// Create a new DiaryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn repo(&self) -> ServiceResult<&'a dyn DiaryRepository> {
        self.ctx.diary_repo().ok_or(ServiceError::Unavailable("diary entries"))
    }

    /// Write a new entry for `member_id`
    #[instrument(skip(self, title, content))]
    pub async fn add(
        &self,
        member_id: MemberId,
        title: Option<&str>,
        content: &str,
    ) -> ServiceResult<DiaryEntry> {
        let repo = self.repo()?;
        // An import may be deleting members
        let _guard = self.ctx.lock_store().await;
        let entry = repo.create(member_id, title, content).await?;

        info!(entry_id = entry.id, member_id = %member_id, "diary entry added");
        Ok(entry)
    }

    /// Get one entry
    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ServiceResult<DiaryEntry> {
        self.repo()?
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::DiaryEntryNotFound(id).into())
    }

    /// Entries newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        member_id: Option<MemberId>,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<DiaryEntry>> {
        Ok(self.repo()?.list(member_id, limit).await?)
    }

    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i64, update: DiaryUpdate) -> ServiceResult<DiaryEntry> {
        if update.is_empty() {
            return Err(ServiceError::validation("nothing to change"));
        }
        Ok(self.repo()?.update(id, &update).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        self.repo()?.delete(id).await?;
        info!(entry_id = id, "diary entry deleted");
        Ok(())
    }

    /// Entries whose title or content contains `term`, ignoring case
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        term: &str,
        member_id: Option<MemberId>,
    ) -> ServiceResult<Vec<DiaryEntry>> {
        if term.trim().is_empty() {
            return Err(ServiceError::validation("search term is empty"));
        }
        Ok(self.repo()?.search(term.trim(), member_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plural_db::{create_memory_pool, SqliteDiaryRepository, SqliteMemberRepository};
    use std::sync::Arc;

    use crate::services::MemberService;

    async fn context() -> ServiceContext {
        let pool = create_memory_pool().await.unwrap();
        ServiceContext::new(
            Arc::new(SqliteMemberRepository::new(pool.clone())),
            None,
            "/tmp",
        )
        .with_diary_repo(Arc::new(SqliteDiaryRepository::new(pool)))
    }

    #[tokio::test]
    async fn test_entry_lifecycle() {
        let ctx = context().await;
        let alex = MemberService::new(&ctx).create("Alex").await.unwrap();
        let diary = DiaryService::new(&ctx);

        let entry = diary.add(alex.id, Some("Monday"), "a calm day").await.unwrap();
        assert_eq!(diary.get(entry.id).await.unwrap().content, "a calm day");

        let edited = diary
            .update(
                entry.id,
                DiaryUpdate {
                    title: Some("Tuesday".to_string()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.title.as_deref(), Some("Tuesday"));

        assert_eq!(diary.search("CALM", Some(alex.id)).await.unwrap().len(), 1);
        assert_eq!(diary.list(None, Some(5)).await.unwrap().len(), 1);

        diary.delete(entry.id).await.unwrap();
        let err = diary.get(entry.id).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_DIARY_ENTRY");
    }

    #[tokio::test]
    async fn test_rejected_requests() {
        let ctx = context().await;
        let diary = DiaryService::new(&ctx);

        let err = diary.add(MemberId::new(2), None, "ghost").await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MEMBER");
        assert!(matches!(
            diary.update(1, DiaryUpdate::default()).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            diary.search("  ", None).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_unavailable_without_diary_store() {
        let pool = create_memory_pool().await.unwrap();
        let ctx = ServiceContext::new(Arc::new(SqliteMemberRepository::new(pool)), None, "/tmp");

        let err = DiaryService::new(&ctx).list(None, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable("diary entries")));
    }
}

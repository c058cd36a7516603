//! Service context - dependency container for services
//!
//! Holds the repositories, the storage root, and the store mutation guard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use plural_core::traits::{DiaryRepository, MemberRepository, MessageRepository};
use tokio::sync::{Mutex, MutexGuard};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Cloning is cheap and every clone shares the same repositories and the
/// same mutation guard, so a clone can be moved into a background import.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    member_repo: Arc<dyn MemberRepository>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    diary_repo: Option<Arc<dyn DiaryRepository>>,

    // Application-private storage root (avatars live here)
    storage_root: PathBuf,

    // Serialises every member store mutation
    write_lock: Arc<Mutex<()>>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        message_repo: Option<Arc<dyn MessageRepository>>,
        storage_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            member_repo,
            message_repo,
            diary_repo: None,
            storage_root: storage_root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Attach a diary store
    pub fn with_diary_repo(mut self, repo: Arc<dyn DiaryRepository>) -> Self {
        self.diary_repo = Some(repo);
        self
    }

    // === Repositories ===

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the message repository, if the backend keeps a message log
    pub fn message_repo(&self) -> Option<&dyn MessageRepository> {
        self.message_repo.as_deref()
    }

    /// Get the diary repository, if the backend keeps diary entries
    pub fn diary_repo(&self) -> Option<&dyn DiaryRepository> {
        self.diary_repo.as_deref()
    }

    // === Storage ===

    /// Root directory relative avatar paths resolve against
    pub fn storage_root(&self) -> &Path {
        &self.storage_root
    }

    /// Acquire the member store mutation guard
    pub async fn lock_store(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("member_repo", &"...")
            .field("message_repo", &self.message_repo.is_some())
            .field("diary_repo", &self.diary_repo.is_some())
            .field("storage_root", &self.storage_root)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    member_repo: Option<Arc<dyn MemberRepository>>,
    message_repo: Option<Arc<dyn MessageRepository>>,
    diary_repo: Option<Arc<dyn DiaryRepository>>,
    storage_root: Option<PathBuf>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn diary_repo(mut self, repo: Arc<dyn DiaryRepository>) -> Self {
        self.diary_repo = Some(repo);
        self
    }

    pub fn storage_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.storage_root = Some(root.into());
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the member repository or storage root is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let member_repo = self
            .member_repo
            .ok_or_else(|| ServiceError::validation("member_repo is required"))?;
        let storage_root = self
            .storage_root
            .ok_or_else(|| ServiceError::validation("storage_root is required"))?;

        let ctx = ServiceContext::new(member_repo, self.message_repo, storage_root);
        Ok(match self.diary_repo {
            Some(repo) => ctx.with_diary_repo(repo),
            None => ctx,
        })
    }
}

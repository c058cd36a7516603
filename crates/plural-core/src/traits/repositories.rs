//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation (SQLite tables or the flat settings file).

use async_trait::async_trait;

use crate::entities::{DiaryEntry, DiaryUpdate, Member, MemberField, Message, NewMember};
use crate::error::DomainError;
use crate::value_objects::MemberId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Number of members in the latest committed state
    async fn count(&self) -> RepoResult<i64>;

    /// Find member by ID
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>>;

    /// List all members ordered by ID
    async fn list(&self) -> RepoResult<Vec<Member>>;

    /// Insert a member with only a name; all optional fields empty
    async fn create(&self, name: &str) -> RepoResult<Member>;

    /// Change exactly one attribute of a member
    async fn update_field(&self, id: MemberId, field: &MemberField) -> RepoResult<Member>;

    /// Discard every member (and their messages) and install a new set
    ///
    /// Either the whole set is installed or the previous state is kept.
    async fn replace_all(&self, members: &[NewMember]) -> RepoResult<Vec<Member>>;
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message; the member must exist
    async fn create(&self, member_id: MemberId, text: &str, timestamp: &str)
        -> RepoResult<Message>;

    /// Most recent messages, newest first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<Message>>;

    /// Total number of stored messages
    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Diary Repository
// ============================================================================

#[async_trait]
pub trait DiaryRepository: Send + Sync {
    /// Add an entry for an existing member
    async fn create(
        &self,
        member_id: MemberId,
        title: Option<&str>,
        content: &str,
    ) -> RepoResult<DiaryEntry>;

    /// Find entry by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<DiaryEntry>>;

    /// Entries newest first, optionally for one member and capped at `limit`
    async fn list(&self, member_id: Option<MemberId>, limit: Option<i64>)
        -> RepoResult<Vec<DiaryEntry>>;

    /// Apply a partial update and bump `updated_at`
    async fn update(&self, id: i64, update: &DiaryUpdate) -> RepoResult<DiaryEntry>;

    /// Delete an entry
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Case-insensitive substring search over title and content, newest first
    async fn search(&self, term: &str, member_id: Option<MemberId>)
        -> RepoResult<Vec<DiaryEntry>>;
}

//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::MemberId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Message not found: {0}")]
    MessageNotFound(i64),

    #[error("Diary entry not found: {0}")]
    DiaryEntryNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Member name cannot be empty")]
    EmptyMemberName,

    #[error("file does not exist: {0}")]
    AvatarMissing(String),

    #[error("not an image: {path} (found {mime})")]
    AvatarNotImage { path: String, mime: String },

    #[error("Invalid proxy tags: {0}")]
    InvalidProxyTags(String),

    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Member name already in use: {0}")]
    MemberNameTaken(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for reporting
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::MessageNotFound(_) => "UNKNOWN_MESSAGE",
            Self::DiaryEntryNotFound(_) => "UNKNOWN_DIARY_ENTRY",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::EmptyMemberName => "EMPTY_MEMBER_NAME",
            Self::AvatarMissing(_) => "AVATAR_MISSING",
            Self::AvatarNotImage { .. } => "AVATAR_NOT_IMAGE",
            Self::InvalidProxyTags(_) => "INVALID_PROXY_TAGS",
            Self::InvalidTheme(_) => "INVALID_THEME",

            // Conflict
            Self::MemberNameTaken(_) => "MEMBER_NAME_TAKEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::MessageNotFound(_) | Self::DiaryEntryNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::EmptyMemberName
                | Self::AvatarMissing(_)
                | Self::AvatarNotImage { .. }
                | Self::InvalidProxyTags(_)
                | Self::InvalidTheme(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::MemberNameTaken(_))
    }
}

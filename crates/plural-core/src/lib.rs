//! # plural-core
//!
//! Domain layer containing entities, value objects, repository traits, and proxy detection.
//! This crate has zero dependencies on infrastructure (database, HTTP client, etc.).

pub mod entities;
pub mod error;
pub mod proxy;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    DiaryEntry, DiaryUpdate, Member, MemberField, Message, NewMember, PLACEHOLDER_MEMBER_NAME,
};
pub use error::DomainError;
pub use proxy::{detect_proxy, ProxyMatch};
pub use traits::{DiaryRepository, MemberRepository, MessageRepository, RepoResult};
pub use value_objects::{
    parse_themes, ColorParseError, MemberId, MemberIdParseError, ProxyTag, Theme, ThemeColor,
    ThemeColors, ThemeType,
};

//! Business logic services
//!
//! Services borrow a [`ServiceContext`] and enforce the rules that sit above
//! the raw repositories.

pub mod avatar;
pub mod context;
pub mod diary;
pub mod error;
pub mod export;
pub mod member;
pub mod message;

pub use avatar::{resolve_avatar_path, validate_avatar_path};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use diary::DiaryService;
pub use error::{ServiceError, ServiceResult};
pub use export::{export_settings_file, ExportService, SettingsImport};
pub use member::MemberService;
pub use message::MessageService;

//! Database models - SQLx-compatible structs for SQLite tables

mod diary;
mod member;
mod message;

pub use diary::DiaryEntryModel;
pub use member::MemberModel;
pub use message::MessageModel;

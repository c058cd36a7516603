//! Domain entities - core business objects

mod diary;
mod member;
mod message;

pub use diary::{normalize_diary_title, validate_diary_content, DiaryEntry, DiaryUpdate};
pub use member::{Member, MemberField, NewMember, PLACEHOLDER_MEMBER_NAME};
pub use message::Message;

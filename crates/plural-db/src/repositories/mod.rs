//! Repository implementations
//!
//! SQLite and flat-file implementations of the repository traits defined in plural-core.

mod diary;
mod error;
mod file;
mod member;
mod message;

pub use diary::SqliteDiaryRepository;
pub use file::FileMemberRepository;
pub use member::SqliteMemberRepository;
pub use message::SqliteMessageRepository;

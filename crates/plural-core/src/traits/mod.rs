//! Repository traits (ports)

mod repositories;

pub use repositories::{DiaryRepository, MemberRepository, MessageRepository, RepoResult};

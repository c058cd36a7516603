//! # plural-db
//!
//! Storage layer implementing the repository traits of `plural-core`.
//!
//! ## Overview
//!
//! Two member stores are provided:
//!
//! - SQLite via SQLx (`members`, `messages` and `diary_entries` tables),
//!   created by a fixed migration script on first run
//! - A flat JSON settings file, read at startup and written at shutdown
//!
//! ## Usage
//!
//! ```rust,ignore
//! use plural_db::pool::{create_pool, DatabaseConfig};
//! use plural_db::repositories::SqliteMemberRepository;
//! use plural_core::traits::MemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("sqlite://data/app.db")).await?;
//!     let members = SqliteMemberRepository::new(pool);
//!     println!("{} members", members.count().await?);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod settings_file;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, DatabaseConfig, SqlitePool};
pub use repositories::{
    FileMemberRepository, SqliteDiaryRepository, SqliteMemberRepository, SqliteMessageRepository,
};
pub use settings_file::{SettingsFile, SettingsMember};

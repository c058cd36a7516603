//! Fixed schema migration, applied on every startup
//!
//! Every statement is idempotent, so opening an existing database is a no-op.
//! There is no further schema versioning.

use sqlx::SqlitePool;
use tracing::debug;

const MIGRATIONS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT UNIQUE NOT NULL,
        pronouns TEXT,
        avatar_path TEXT,
        color TEXT,
        description TEXT,
        remote_id TEXT,
        proxy_tags TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS messages (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id INTEGER NOT NULL,
        message TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (member_id) REFERENCES members (id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS diary_entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id INTEGER NOT NULL,
        title TEXT,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        FOREIGN KEY (member_id) REFERENCES members (id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_message_member ON messages (member_id)",
    "CREATE INDEX IF NOT EXISTS idx_diary_member ON diary_entries (member_id)",
    "CREATE INDEX IF NOT EXISTS idx_diary_created ON diary_entries (created_at)",
    "CREATE INDEX IF NOT EXISTS idx_member_name ON members (name)",
];

/// Create the tables and indexes if they do not exist
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in MIGRATIONS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    debug!(statements = MIGRATIONS.len(), "schema migration applied");
    Ok(())
}

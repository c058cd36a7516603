//! SQLite implementation of MemberRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

use plural_core::entities::{Member, MemberField, NewMember};
use plural_core::traits::{MemberRepository, RepoResult};
use plural_core::value_objects::MemberId;

use crate::mappers::encode_proxy_tags;
use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation, member_name_taken, member_not_found};

/// SQLite implementation of MemberRepository
#[derive(Clone)]
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Create a new SqliteMemberRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, pronouns, avatar_path, color, description, remote_id,
                   proxy_tags, created_at, updated_at
            FROM members
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Member>> {
        let results = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, pronouns, avatar_path, color, description, remote_id,
                   proxy_tags, created_at, updated_at
            FROM members
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Member> {
        let new_member = NewMember::named(name);
        new_member.validate()?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO members (name, created_at, updated_at)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || member_name_taken(name)))?;

        let id = MemberId::new(result.last_insert_rowid());
        info!(member_id = %id, "member created");

        Ok(new_member.into_member(id, now))
    }

    #[instrument(skip(self, field), fields(field = field.name()))]
    async fn update_field(&self, id: MemberId, field: &MemberField) -> RepoResult<Member> {
        field.validate()?;

        let query = match field {
            MemberField::Name(name) => {
                sqlx::query("UPDATE members SET name = ?, updated_at = ? WHERE id = ?")
                    .bind(name.as_str())
            }
            MemberField::Pronouns(pronouns) => {
                sqlx::query("UPDATE members SET pronouns = ?, updated_at = ? WHERE id = ?")
                    .bind(pronouns.as_deref())
            }
            MemberField::AvatarPath(path) => {
                sqlx::query("UPDATE members SET avatar_path = ?, updated_at = ? WHERE id = ?")
                    .bind(path.as_deref())
            }
            MemberField::Color(color) => {
                sqlx::query("UPDATE members SET color = ?, updated_at = ? WHERE id = ?")
                    .bind(color.as_deref())
            }
            MemberField::Description(description) => {
                sqlx::query("UPDATE members SET description = ?, updated_at = ? WHERE id = ?")
                    .bind(description.as_deref())
            }
            MemberField::ProxyTags(tags) => {
                sqlx::query("UPDATE members SET proxy_tags = ?, updated_at = ? WHERE id = ?")
                    .bind(encode_proxy_tags(tags)?)
            }
        };

        let result = query
            .bind(Utc::now())
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(|e| match field {
                MemberField::Name(name) => map_unique_violation(e, || member_name_taken(name)),
                _ => map_db_error(e),
            })?;

        if result.rows_affected() == 0 {
            return Err(member_not_found(id));
        }

        self.find_by_id(id).await?.ok_or_else(|| member_not_found(id))
    }

    #[instrument(skip(self, members), fields(count = members.len()))]
    async fn replace_all(&self, members: &[NewMember]) -> RepoResult<Vec<Member>> {
        for member in members {
            member.validate()?;
        }

        // Dropping the transaction on any early return rolls everything back
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM diary_entries")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        sqlx::query("DELETE FROM messages")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        sqlx::query("DELETE FROM members")
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let now = Utc::now();
        let mut stored = Vec::with_capacity(members.len());
        for member in members {
            let result = sqlx::query(
                r#"
                INSERT INTO members (name, pronouns, avatar_path, color, description,
                                     remote_id, proxy_tags, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&member.name)
            .bind(&member.pronouns)
            .bind(&member.avatar_path)
            .bind(&member.color)
            .bind(&member.description)
            .bind(&member.remote_id)
            .bind(encode_proxy_tags(&member.proxy_tags)?)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_unique_violation(e, || member_name_taken(&member.name)))?;

            let id = MemberId::new(result.last_insert_rowid());
            stored.push(member.clone().into_member(id, now));
        }

        tx.commit().await.map_err(map_db_error)?;
        info!(count = stored.len(), "member set replaced");

        Ok(stored)
    }
}

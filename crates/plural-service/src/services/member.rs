//! Member service
//!
//! Every mutation goes through the store guard in [`ServiceContext`], so a
//! background import never interleaves with direct edits.

use std::path::Path;

use plural_core::entities::{Member, MemberField, NewMember, PLACEHOLDER_MEMBER_NAME};
use plural_core::value_objects::{MemberId, ThemeColor};
use plural_core::DomainError;
use tracing::{info, instrument, warn};

use super::avatar::{resolve_avatar_path, validate_avatar_path};
use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member service
pub struct MemberService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberService<'a> {
    /// Create a new MemberService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Number of stored members
    #[instrument(skip(self))]
    pub async fn count(&self) -> ServiceResult<i64> {
        Ok(self.ctx.member_repo().count().await?)
    }

    /// Get member by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: MemberId) -> ServiceResult<Member> {
        self.ctx
            .member_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(id).into())
    }

    /// List all members ordered by ID
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<Member>> {
        Ok(self.ctx.member_repo().list().await?)
    }

    /// Create a member with only a name
    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> ServiceResult<Member> {
        let _guard = self.ctx.lock_store().await;
        Ok(self.ctx.member_repo().create(name).await?)
    }

    /// Create a member with the placeholder name
    ///
    /// When the placeholder is already taken a ` (n)` suffix is appended.
    #[instrument(skip(self))]
    pub async fn create_placeholder(&self) -> ServiceResult<Member> {
        let _guard = self.ctx.lock_store().await;

        let existing = self.ctx.member_repo().list().await?;
        let taken = |name: &str| existing.iter().any(|m| m.name == name);

        let mut name = PLACEHOLDER_MEMBER_NAME.to_string();
        let mut n = 2;
        while taken(&name) {
            name = format!("{PLACEHOLDER_MEMBER_NAME} ({n})");
            n += 1;
        }

        Ok(self.ctx.member_repo().create(&name).await?)
    }

    /// Change exactly one attribute of a member
    ///
    /// Avatar references must name an existing image file (an empty reference
    /// clears the avatar) and colors must parse as `#RGB`, `#RRGGBB` or
    /// `#RRGGBBAA`. A rejected value leaves the stored member unchanged.
    #[instrument(skip(self, field), fields(member_id = %id, field = field.name()))]
    pub async fn update_field(&self, id: MemberId, field: MemberField) -> ServiceResult<Member> {
        let field = self.check_field(field)?;

        let _guard = self.ctx.lock_store().await;
        let member = self.ctx.member_repo().update_field(id, &field).await?;

        info!(member_id = %id, field = field.name(), "member updated");
        Ok(member)
    }

    /// Discard every member and install a new set, all or nothing
    ///
    /// Avatar references are checked like direct edits; a single missing or
    /// non-image avatar rejects the whole set. Empty references become `None`.
    #[instrument(skip(self, members), fields(count = members.len()))]
    pub async fn replace_all(&self, members: &[NewMember]) -> ServiceResult<Vec<Member>> {
        let members = checked_avatars(self.ctx.storage_root(), members)?;

        let _guard = self.ctx.lock_store().await;
        Ok(self.ctx.member_repo().replace_all(&members).await?)
    }

    /// Install a member set whose relative avatar files still sit in `staging`
    ///
    /// The files are validated where they are and moved into the storage root
    /// only once the new set is committed.
    #[instrument(skip(self, members, staging), fields(count = members.len()))]
    pub(crate) async fn replace_all_staged(
        &self,
        members: &[NewMember],
        staging: &Path,
    ) -> ServiceResult<Vec<Member>> {
        let members = checked_avatars(staging, members)?;

        let _guard = self.ctx.lock_store().await;
        let stored = self.ctx.member_repo().replace_all(&members).await?;
        promote_avatars(staging, self.ctx.storage_root(), &stored).await;

        Ok(stored)
    }

    fn check_field(&self, field: MemberField) -> ServiceResult<MemberField> {
        match field {
            MemberField::AvatarPath(Some(reference)) => {
                match validate_avatar_path(self.ctx.storage_root(), &reference)? {
                    Some(_) => Ok(MemberField::AvatarPath(Some(reference))),
                    None => Ok(MemberField::AvatarPath(None)),
                }
            }
            MemberField::Color(Some(color)) => {
                ThemeColor::parse(&color)
                    .map_err(|e| DomainError::ValidationError(format!("color {color:?}: {e}")))?;
                Ok(MemberField::Color(Some(color)))
            }
            other => {
                other.validate()?;
                Ok(other)
            }
        }
    }
}

fn checked_avatars(root: &Path, members: &[NewMember]) -> Result<Vec<NewMember>, DomainError> {
    members
        .iter()
        .cloned()
        .map(|mut member| {
            if let Some(reference) = member.avatar_path.take() {
                if validate_avatar_path(root, &reference)?.is_some() {
                    member.avatar_path = Some(reference);
                }
            }
            Ok(member)
        })
        .collect()
}

async fn promote_avatars(staging: &Path, root: &Path, members: &[Member]) {
    for reference in members.iter().filter_map(|m| m.avatar_path.as_deref()) {
        let from = resolve_avatar_path(staging, reference);
        // Absolute references were never staged
        if !from.starts_with(staging) {
            continue;
        }

        let to = resolve_avatar_path(root, reference);
        if let Err(e) = tokio::fs::rename(&from, &to).await {
            warn!(
                from = %from.display(),
                to = %to.display(),
                error = %e,
                "could not move imported avatar into place"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::avatar::tests::PNG_BYTES;
    use plural_db::{create_memory_pool, SqliteMemberRepository};
    use std::sync::Arc;
    use tempfile::TempDir;

    async fn context() -> (ServiceContext, TempDir) {
        let root = tempfile::tempdir().unwrap();
        let pool = create_memory_pool().await.unwrap();
        let ctx = ServiceContext::new(
            Arc::new(SqliteMemberRepository::new(pool)),
            None,
            root.path(),
        );
        (ctx, root)
    }

    #[tokio::test]
    async fn test_get_unknown_member() {
        let (ctx, _root) = context().await;
        let err = MemberService::new(&ctx).get(MemberId::new(3)).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MEMBER");
    }

    #[tokio::test]
    async fn test_placeholder_names_are_disambiguated() {
        let (ctx, _root) = context().await;
        let service = MemberService::new(&ctx);

        let first = service.create_placeholder().await.unwrap();
        let second = service.create_placeholder().await.unwrap();
        let third = service.create_placeholder().await.unwrap();

        assert_eq!(first.name, "New Member");
        assert_eq!(second.name, "New Member (2)");
        assert_eq!(third.name, "New Member (3)");
        assert_eq!(service.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_valid_avatar_is_stored() {
        let (ctx, root) = context().await;
        std::fs::write(root.path().join("alex.png"), PNG_BYTES).unwrap();
        let service = MemberService::new(&ctx);
        let member = service.create("Alex").await.unwrap();

        let updated = service
            .update_field(member.id, MemberField::AvatarPath(Some("alex.png".to_string())))
            .await
            .unwrap();
        assert_eq!(updated.avatar_path.as_deref(), Some("alex.png"));
    }

    #[tokio::test]
    async fn test_missing_avatar_leaves_member_unchanged() {
        let (ctx, root) = context().await;
        std::fs::write(root.path().join("alex.png"), PNG_BYTES).unwrap();
        let service = MemberService::new(&ctx);
        let member = service.create("Alex").await.unwrap();
        service
            .update_field(member.id, MemberField::AvatarPath(Some("alex.png".to_string())))
            .await
            .unwrap();

        let err = service
            .update_field(member.id, MemberField::AvatarPath(Some("gone.png".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AVATAR_MISSING");

        let stored = service.get(member.id).await.unwrap();
        assert_eq!(stored.avatar_path.as_deref(), Some("alex.png"));
    }

    #[tokio::test]
    async fn test_empty_avatar_clears() {
        let (ctx, root) = context().await;
        std::fs::write(root.path().join("a.png"), PNG_BYTES).unwrap();
        let service = MemberService::new(&ctx);
        let member = service.create("Alex").await.unwrap();
        service
            .update_field(member.id, MemberField::AvatarPath(Some("a.png".to_string())))
            .await
            .unwrap();

        let updated = service
            .update_field(member.id, MemberField::AvatarPath(Some(String::new())))
            .await
            .unwrap();
        assert!(updated.avatar_path.is_none());
    }

    #[tokio::test]
    async fn test_invalid_color_is_rejected() {
        let (ctx, _root) = context().await;
        let service = MemberService::new(&ctx);
        let member = service.create("Sam").await.unwrap();

        let err = service
            .update_field(member.id, MemberField::Color(Some("red".to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let updated = service
            .update_field(member.id, MemberField::Color(Some("#ff8800".to_string())))
            .await
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("#ff8800"));
    }

    #[tokio::test]
    async fn test_replace_all() {
        let (ctx, _root) = context().await;
        let service = MemberService::new(&ctx);
        service.create("Old").await.unwrap();

        let stored = service
            .replace_all(&[NewMember::named("A"), NewMember::named("B")])
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
        let names: Vec<_> = service.list().await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn test_concurrent_placeholders_get_distinct_names() {
        let (ctx, _root) = context().await;
        let service = MemberService::new(&ctx);

        let (a, b, c) = tokio::join!(
            service.create_placeholder(),
            service.create_placeholder(),
            service.create_placeholder()
        );
        let mut names = vec![a.unwrap().name, b.unwrap().name, c.unwrap().name];
        names.sort();
        assert_eq!(names, ["New Member", "New Member (2)", "New Member (3)"]);
    }

    #[tokio::test]
    async fn test_missing_absolute_avatar_leaves_member_unchanged() {
        let (ctx, root) = context().await;
        std::fs::write(root.path().join("alex.png"), PNG_BYTES).unwrap();
        let service = MemberService::new(&ctx);
        let member = service.create("Alex").await.unwrap();
        service
            .update_field(member.id, MemberField::AvatarPath(Some("alex.png".to_string())))
            .await
            .unwrap();

        let missing = "/nonexistent/path.png";
        let err = service
            .update_field(member.id, MemberField::AvatarPath(Some(missing.to_string())))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AVATAR_MISSING");
        assert!(err.to_string().contains("file does not exist"));

        let stored = service.get(member.id).await.unwrap();
        assert_eq!(stored.avatar_path.as_deref(), Some("alex.png"));
    }

    #[tokio::test]
    async fn test_replace_all_rejects_missing_avatar() {
        let (ctx, _root) = context().await;
        let service = MemberService::new(&ctx);
        service.create("Keep").await.unwrap();

        let missing = "/nonexistent/path.png";
        let err = service
            .replace_all(&[
                NewMember::named("A"),
                NewMember::named("B").with_avatar(missing),
            ])
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AVATAR_MISSING");

        let names: Vec<_> = service.list().await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Keep"]);
    }

    #[tokio::test]
    async fn test_replace_all_checks_avatars_under_storage_root() {
        let (ctx, root) = context().await;
        std::fs::write(root.path().join("a.png"), PNG_BYTES).unwrap();
        std::fs::write(root.path().join("notes.png"), b"plain text").unwrap();
        let service = MemberService::new(&ctx);

        let err = service
            .replace_all(&[NewMember::named("B").with_avatar("notes.png")])
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AVATAR_NOT_IMAGE");

        let stored = service
            .replace_all(&[
                NewMember::named("A").with_avatar("a.png"),
                NewMember::named("B").with_avatar(""),
            ])
            .await
            .unwrap();
        assert_eq!(stored[0].avatar_path.as_deref(), Some("a.png"));
        assert!(stored[1].avatar_path.is_none());
    }

    #[tokio::test]
    async fn test_staged_avatars_move_in_after_commit() {
        let (ctx, root) = context().await;
        let staging = tempfile::tempdir_in(root.path()).unwrap();
        std::fs::write(staging.path().join("a.png"), PNG_BYTES).unwrap();
        let service = MemberService::new(&ctx);

        // A rejected set leaves the staged file where it is
        let err = service
            .replace_all_staged(
                &[
                    NewMember::named("A").with_avatar("a.png"),
                    NewMember::named("B").with_avatar("b.png"),
                ],
                staging.path(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "AVATAR_MISSING");
        assert!(!root.path().join("a.png").exists());

        service
            .replace_all_staged(&[NewMember::named("A").with_avatar("a.png")], staging.path())
            .await
            .unwrap();
        assert!(root.path().join("a.png").is_file());
        assert!(!staging.path().join("a.png").exists());
    }
}

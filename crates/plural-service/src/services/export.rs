//! Settings file export and import
//!
//! Works with any backend: the flat settings format is the interchange format.

use std::path::Path;

use plural_core::entities::Member;
use plural_db::SettingsFile;
use tracing::{info, instrument, warn};

use super::avatar::validate_avatar_path;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::member::MemberService;

/// Build a settings document from stored members
pub fn export_settings_file(members: &[Member]) -> SettingsFile {
    SettingsFile::from_members(members)
}

/// Outcome of a settings file import
#[derive(Debug, Clone)]
pub struct SettingsImport {
    /// Members now in the store
    pub members: Vec<Member>,
    /// Avatar references dropped because the file was missing or not an image
    pub cleared_avatars: usize,
}

/// Export service
pub struct ExportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ExportService<'a> {
    /// Create a new ExportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Write every member to a settings file
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn export_to(&self, path: &Path) -> ServiceResult<usize> {
        let members = MemberService::new(self.ctx).list().await?;
        export_settings_file(&members).write(path).await?;

        info!(count = members.len(), "members exported");
        Ok(members.len())
    }

    /// Replace the store with the members of a settings file
    ///
    /// Files written on another machine often point at avatars that do not
    /// exist here; those references are cleared and counted instead of
    /// failing the import.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn import_from(&self, path: &Path) -> ServiceResult<SettingsImport> {
        let file = SettingsFile::read(path).await?;

        let mut members = file.into_new_members();
        let mut cleared_avatars = 0;
        for member in &mut members {
            let Some(reference) = member.avatar_path.as_deref() else {
                continue;
            };
            if let Err(e) = validate_avatar_path(self.ctx.storage_root(), reference) {
                warn!(member = %member.name, error = %e, "avatar reference cleared");
                member.avatar_path = None;
                cleared_avatars += 1;
            }
        }

        let stored = MemberService::new(self.ctx).replace_all(&members).await?;

        info!(
            count = stored.len(),
            cleared_avatars, "members imported from settings file"
        );
        Ok(SettingsImport {
            members: stored,
            cleared_avatars,
        })
    }
}

//! Flat-file implementation of MemberRepository
//!
//! The whole member list lives in memory; the settings file is read once at
//! open and written back by [`FileMemberRepository::save`].

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use tracing::{info, instrument};

use plural_core::entities::{Member, MemberField, NewMember};
use plural_core::error::DomainError;
use plural_core::traits::{MemberRepository, RepoResult};
use plural_core::value_objects::MemberId;

use crate::settings_file::SettingsFile;

use super::error::{member_name_taken, member_not_found};

struct FileState {
    members: Vec<Member>,
    next_id: i64,
}

impl FileState {
    fn install(&mut self, members: Vec<NewMember>) -> Vec<Member> {
        let now = Utc::now();
        let installed: Vec<Member> = members
            .into_iter()
            .map(|member| {
                let id = MemberId::new(self.next_id);
                self.next_id += 1;
                member.into_member(id, now)
            })
            .collect();
        self.members = installed.clone();
        installed
    }

    fn name_taken(&self, name: &str, except: Option<MemberId>) -> bool {
        self.members
            .iter()
            .any(|m| m.name == name && Some(m.id) != except)
    }
}

/// Names must be valid and unique across the whole set
fn check_member_set(members: &[NewMember]) -> RepoResult<()> {
    let mut seen = HashSet::new();
    for member in members {
        member.validate()?;
        if !seen.insert(member.name.as_str()) {
            return Err(member_name_taken(&member.name));
        }
    }
    Ok(())
}

/// Member store backed by the flat JSON settings file
pub struct FileMemberRepository {
    path: PathBuf,
    state: RwLock<FileState>,
}

impl FileMemberRepository {
    /// Load the settings file, starting empty when it does not exist yet
    ///
    /// Ids are assigned 1..=n in file order. A file with a blank or repeated
    /// member name is rejected as a storage error.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", path.display())))?;

        let file = if exists {
            SettingsFile::read(&path).await?
        } else {
            SettingsFile::default()
        };

        let members = file.into_new_members();
        check_member_set(&members)
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", path.display())))?;

        let mut state = FileState {
            members: Vec::new(),
            next_id: 1,
        };
        let loaded = state.install(members);
        info!(path = %path.display(), members = loaded.len(), "settings file loaded");

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    /// Location of the backing settings file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the current member list back to the settings file
    pub async fn save(&self) -> Result<(), DomainError> {
        let snapshot = SettingsFile::from_members(&self.state.read().members);
        snapshot.write(&self.path).await
    }
}

#[async_trait]
impl MemberRepository for FileMemberRepository {
    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.read().members.len() as i64)
    }

    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        Ok(self.state.read().members.iter().find(|m| m.id == id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Member>> {
        Ok(self.state.read().members.clone())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Member> {
        let new_member = NewMember::named(name);
        new_member.validate()?;

        let mut state = self.state.write();
        if state.name_taken(name, None) {
            return Err(member_name_taken(name));
        }

        let id = MemberId::new(state.next_id);
        state.next_id += 1;
        let member = new_member.into_member(id, Utc::now());
        state.members.push(member.clone());

        Ok(member)
    }

    #[instrument(skip(self, field), fields(field = field.name()))]
    async fn update_field(&self, id: MemberId, field: &MemberField) -> RepoResult<Member> {
        field.validate()?;

        let mut state = self.state.write();
        if let MemberField::Name(name) = field {
            if state.name_taken(name, Some(id)) {
                return Err(member_name_taken(name));
            }
        }

        let member = state
            .members
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| member_not_found(id))?;
        member.apply(field.clone());

        Ok(member.clone())
    }

    #[instrument(skip(self, members), fields(count = members.len()))]
    async fn replace_all(&self, members: &[NewMember]) -> RepoResult<Vec<Member>> {
        check_member_set(members)?;

        let installed = self.state.write().install(members.to_vec());
        info!(count = installed.len(), "member set replaced");

        Ok(installed)
    }
}

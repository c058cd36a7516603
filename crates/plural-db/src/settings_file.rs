//! Flat JSON settings file
//!
//! `{"members": [{"avatar": "", "name": "", "pronouns": "", "proxy": [...]}]}`.
//! Absent text values are written as empty strings. Color, description and
//! remote id are only written when set, so files from older versions still load.

use std::path::Path;

use plural_core::entities::{Member, NewMember};
use plural_core::error::DomainError;
use plural_core::value_objects::ProxyTag;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Top-level settings document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub members: Vec<SettingsMember>,
}

/// One member entry of the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsMember {
    #[serde(default)]
    pub avatar: String,
    pub name: String,
    #[serde(default)]
    pub pronouns: String,
    #[serde(default)]
    pub proxy: Vec<ProxyTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,
}

impl SettingsFile {
    /// Build a settings document from stored members
    pub fn from_members(members: &[Member]) -> Self {
        Self {
            members: members.iter().map(SettingsMember::from).collect(),
        }
    }

    /// Convert the entries into unsaved members, in file order
    pub fn into_new_members(self) -> Vec<NewMember> {
        self.members.into_iter().map(NewMember::from).collect()
    }

    /// Decode a settings document
    pub fn parse(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::StorageError(format!("invalid settings file: {e}")))
    }

    /// Read and decode a settings file
    pub async fn read(path: &Path) -> Result<Self, DomainError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::StorageError(format!("{}: {e}", path.display())))?;
        Self::parse(&json)
    }

    /// Write the settings file, replacing any previous version in one rename
    pub async fn write(&self, path: &Path) -> Result<(), DomainError> {
        let storage_error =
            |e: std::io::Error| DomainError::StorageError(format!("{}: {e}", path.display()));

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(storage_error)?;
        tokio::fs::rename(&tmp, path).await.map_err(storage_error)?;

        debug!(path = %path.display(), members = self.members.len(), "settings file written");
        Ok(())
    }
}

impl From<&Member> for SettingsMember {
    fn from(member: &Member) -> Self {
        Self {
            avatar: member.avatar_path.clone().unwrap_or_default(),
            name: member.name.clone(),
            pronouns: member.pronouns.clone().unwrap_or_default(),
            proxy: member.proxy_tags.clone(),
            color: member.color.clone(),
            description: member.description.clone(),
            remote_id: member.remote_id.clone(),
        }
    }
}

impl From<SettingsMember> for NewMember {
    fn from(entry: SettingsMember) -> Self {
        fn non_empty(value: String) -> Option<String> {
            (!value.is_empty()).then_some(value)
        }

        NewMember {
            name: entry.name,
            pronouns: non_empty(entry.pronouns),
            avatar_path: non_empty(entry.avatar),
            color: entry.color,
            description: entry.description,
            remote_id: entry.remote_id,
            proxy_tags: entry.proxy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plural_core::value_objects::MemberId;

    #[test]
    fn test_parse_minimal_entry() {
        let file = SettingsFile::parse(
            r#"{"members":[{"avatar":"","name":"Alex","pronouns":"they/them","proxy":[{"prefix":"a:"}]}]}"#,
        )
        .unwrap();

        let members = file.into_new_members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Alex");
        assert_eq!(members[0].pronouns.as_deref(), Some("they/them"));
        assert!(members[0].avatar_path.is_none());
        assert_eq!(members[0].proxy_tags, vec![ProxyTag::prefix("a:")]);
    }

    #[test]
    fn test_empty_values_are_written_as_empty_strings() {
        let member = Member::new(MemberId::new(1), "Sam");
        let json = serde_json::to_string(&SettingsFile::from_members(&[member])).unwrap();
        assert_eq!(
            json,
            r#"{"members":[{"avatar":"","name":"Sam","pronouns":"","proxy":[]}]}"#
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SettingsFile::parse("[1, 2]").is_err());
        assert_eq!(SettingsFile::parse("{}").unwrap(), SettingsFile::default());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut member = Member::new(MemberId::new(4), "Rin");
        member.color = Some("#ff0000".to_string());
        let file = SettingsFile::from_members(&[member]);

        file.write(&path).await.unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(SettingsFile::read(&path).await.unwrap(), file);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SettingsFile::read(&dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, DomainError::StorageError(_)));
    }
}

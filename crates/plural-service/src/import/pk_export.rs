//! PluralKit export file source
//!
//! Reads the JSON document produced by `pk;export`. Avatars are still
//! downloaded from the URLs the export points at.

use std::path::PathBuf;

use async_trait::async_trait;
use plural_core::value_objects::ProxyTag;
use serde::Deserialize;
use tracing::{info, instrument};

use super::error::ImportError;
use super::source::{normalize_color, MemberSource, RemoteMember};

/// Member list of a PluralKit export file
#[derive(Debug, Clone)]
pub struct PluralKitExportSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PkExport {
    version: u8,
    id: String,
    members: Vec<PkExportMember>,
}

#[derive(Debug, Deserialize)]
struct PkExportMember {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: Option<String>,
    display_name: Option<String>,
    pronouns: Option<String>,
    avatar_url: Option<String>,
    color: Option<String>,
    description: Option<String>,
    #[serde(default)]
    proxy_tags: Vec<ProxyTag>,
}

impl PkExportMember {
    /// Prefer a distinct display name and keep the account name in the description
    fn into_remote(self) -> RemoteMember {
        let base = self.name.as_deref().map(str::trim).unwrap_or_default().to_string();
        let display = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty() && *d != base)
            .map(str::to_string);

        let description = self.description.filter(|d| !d.trim().is_empty());
        let (name, description) = match display {
            Some(display) => {
                let note = format!("Original name: {base}");
                let description = match description {
                    Some(original) => format!("{note}\n\n{original}"),
                    None => note,
                };
                (display, Some(description))
            }
            None => (base, description),
        };

        RemoteMember {
            remote_id: self.id,
            name,
            pronouns: self.pronouns,
            avatar_url: self.avatar_url,
            color: normalize_color(self.color.as_deref()),
            description,
            proxy_tags: self.proxy_tags,
        }
    }
}

impl PluralKitExportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MemberSource for PluralKitExportSource {
    fn service_name(&self) -> &'static str {
        "PluralKit export"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch(&self) -> Result<String, ImportError> {
        info!("reading PluralKit export file");
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn parse(&self, body: &str) -> Result<Vec<RemoteMember>, ImportError> {
        let export: PkExport = serde_json::from_str(body)
            .map_err(|e| ImportError::Decode(format!("not a PluralKit export: {e}")))?;
        if !matches!(export.version, 1 | 2) {
            return Err(ImportError::Decode(format!(
                "unsupported PluralKit export version {}",
                export.version
            )));
        }

        info!(system = %export.id, members = export.members.len(), "PluralKit export decoded");
        Ok(export
            .members
            .into_iter()
            .map(PkExportMember::into_remote)
            .collect())
    }
}

//! Remote member sources

use std::time::Duration;

use async_trait::async_trait;
use plural_core::entities::NewMember;
use plural_core::value_objects::{ProxyTag, ThemeColor};
use tracing::{debug, warn};

use super::error::ImportError;

/// One member record as delivered by a remote service
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteMember {
    pub remote_id: String,
    pub name: String,
    pub pronouns: Option<String>,
    pub avatar_url: Option<String>,
    /// Normalised to `#RRGGBB`; dropped when the service sent something unparsable
    pub color: Option<String>,
    pub description: Option<String>,
    pub proxy_tags: Vec<ProxyTag>,
}

impl RemoteMember {
    /// Convert to an unsaved member with the given avatar reference
    pub fn into_new_member(self, avatar_path: Option<String>) -> NewMember {
        NewMember {
            name: self.name,
            pronouns: self.pronouns.filter(|p| !p.trim().is_empty()),
            avatar_path,
            color: self.color,
            description: self.description.filter(|d| !d.trim().is_empty()),
            remote_id: Some(self.remote_id).filter(|id| !id.is_empty()),
            proxy_tags: self.proxy_tags.into_iter().filter(ProxyTag::is_usable).collect(),
        }
    }
}

/// A remote service that lists the members of one system
#[async_trait]
pub trait MemberSource: Send + Sync {
    /// Human-readable service name
    fn service_name(&self) -> &'static str;

    /// Download the raw member list
    async fn fetch(&self) -> Result<String, ImportError>;

    /// Decode a downloaded member list
    fn parse(&self, body: &str) -> Result<Vec<RemoteMember>, ImportError>;
}

/// Build the HTTP client used by the remote sources
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ImportError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// Accept system and account identifiers made of letters, digits, `-` and `_`
///
/// Identifiers are spliced into URL paths, so anything else is refused.
pub fn validate_identifier(kind: &str, value: &str) -> Result<(), ImportError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ImportError::InvalidIdentifier(format!("{kind} {value:?}")))
    }
}

/// Turn a non-success response into [`ImportError::Status`]
pub(crate) fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, ImportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ImportError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// Send a request and return the body of a successful response
pub(crate) async fn fetch_text(request: reqwest::RequestBuilder) -> Result<String, ImportError> {
    let response = check_status(request.send().await?)?;

    let body = response.text().await?;
    debug!(bytes = body.len(), "member list downloaded");
    Ok(body)
}

/// Normalise a remote color; `#` is optional on input
pub(crate) fn normalize_color(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|c| !c.is_empty())?;
    let candidate = if raw.starts_with('#') {
        raw.to_string()
    } else {
        format!("#{raw}")
    };

    match ThemeColor::parse(&candidate) {
        Ok(_) => Some(candidate.to_lowercase()),
        Err(_) => {
            warn!(color = raw, "ignoring unparsable member color");
            None
        }
    }
}

pub(crate) fn base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

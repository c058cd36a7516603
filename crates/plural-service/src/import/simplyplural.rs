//! Simply Plural member source

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use tracing::{info, instrument};

use super::error::ImportError;
use super::source::{
    base_url, fetch_text, normalize_color, validate_identifier, MemberSource, RemoteMember,
};

/// Member list of a Simply Plural account, read with an account token
#[derive(Clone)]
pub struct SimplyPluralSource {
    client: reqwest::Client,
    base_url: String,
    account_id: String,
    token: HeaderValue,
}

#[derive(Debug, Deserialize)]
struct SpMember {
    id: String,
    content: SpMemberContent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpMemberContent {
    #[serde(default)]
    name: String,
    avatar_url: Option<String>,
    pronouns: Option<String>,
    color: Option<String>,
    desc: Option<String>,
}

impl SimplyPluralSource {
    /// Create a source for an account id and its API token
    pub fn new(
        client: reqwest::Client,
        base_url_raw: &str,
        account_id: &str,
        token: &str,
    ) -> Result<Self, ImportError> {
        let account_id = account_id.trim();
        validate_identifier("account id", account_id)?;

        let token = token.trim();
        if token.is_empty() {
            return Err(ImportError::InvalidIdentifier("token is empty".to_string()));
        }
        let mut token = HeaderValue::from_str(token).map_err(|_| {
            ImportError::InvalidIdentifier("token contains invalid characters".to_string())
        })?;
        token.set_sensitive(true);

        Ok(Self {
            client,
            base_url: base_url(base_url_raw),
            account_id: account_id.to_string(),
            token,
        })
    }

    fn members_url(&self) -> String {
        format!("{}/v1/members/{}", self.base_url, self.account_id)
    }
}

impl std::fmt::Debug for SimplyPluralSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplyPluralSource")
            .field("base_url", &self.base_url)
            .field("account_id", &self.account_id)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MemberSource for SimplyPluralSource {
    fn service_name(&self) -> &'static str {
        "Simply Plural"
    }

    #[instrument(skip(self), fields(account = %self.account_id))]
    async fn fetch(&self) -> Result<String, ImportError> {
        info!("requesting Simply Plural member list");
        let request = self
            .client
            .get(self.members_url())
            .header(AUTHORIZATION, self.token.clone());
        fetch_text(request).await
    }

    fn parse(&self, body: &str) -> Result<Vec<RemoteMember>, ImportError> {
        let members: Vec<SpMember> =
            serde_json::from_str(body).map_err(|e| ImportError::Decode(e.to_string()))?;

        Ok(members
            .into_iter()
            .map(|m| RemoteMember {
                color: normalize_color(m.content.color.as_deref()),
                remote_id: m.id,
                name: m.content.name,
                pronouns: m.content.pronouns,
                avatar_url: m.content.avatar_url,
                description: m.content.desc,
                proxy_tags: Vec::new(),
            })
            .collect())
    }
}

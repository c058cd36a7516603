//! PluralKit member source

use async_trait::async_trait;
use plural_core::value_objects::ProxyTag;
use serde::Deserialize;
use tracing::{info, instrument};

use super::error::ImportError;
use super::source::{
    base_url, fetch_text, normalize_color, validate_identifier, MemberSource, RemoteMember,
};

/// Public member list of a PluralKit system
#[derive(Debug, Clone)]
pub struct PluralKitSource {
    client: reqwest::Client,
    base_url: String,
    system_id: String,
}

#[derive(Debug, Deserialize)]
struct PkMember {
    id: String,
    #[serde(default)]
    name: String,
    pronouns: Option<String>,
    avatar_url: Option<String>,
    color: Option<String>,
    description: Option<String>,
    #[serde(default)]
    proxy_tags: Vec<ProxyTag>,
}

impl PluralKitSource {
    /// Create a source for the system with the given 5 or 6 character id
    pub fn new(
        client: reqwest::Client,
        base_url_raw: &str,
        system_id: &str,
    ) -> Result<Self, ImportError> {
        let system_id = system_id.trim();
        validate_identifier("system id", system_id)?;

        Ok(Self {
            client,
            base_url: base_url(base_url_raw),
            system_id: system_id.to_string(),
        })
    }

    fn members_url(&self) -> String {
        format!("{}/v2/systems/{}/members", self.base_url, self.system_id)
    }
}

#[async_trait]
impl MemberSource for PluralKitSource {
    fn service_name(&self) -> &'static str {
        "PluralKit"
    }

    #[instrument(skip(self), fields(system = %self.system_id))]
    async fn fetch(&self) -> Result<String, ImportError> {
        info!("requesting PluralKit member list");
        fetch_text(self.client.get(self.members_url())).await
    }

    fn parse(&self, body: &str) -> Result<Vec<RemoteMember>, ImportError> {
        let members: Vec<PkMember> =
            serde_json::from_str(body).map_err(|e| ImportError::Decode(e.to_string()))?;

        Ok(members
            .into_iter()
            .map(|m| RemoteMember {
                color: normalize_color(m.color.as_deref()),
                remote_id: m.id,
                name: m.name,
                pronouns: m.pronouns,
                avatar_url: m.avatar_url,
                description: m.description,
                proxy_tags: m.proxy_tags,
            })
            .collect())
    }
}

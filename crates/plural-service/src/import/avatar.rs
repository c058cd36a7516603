//! Avatar downloads

use std::path::Path;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use tracing::{debug, instrument};

use super::error::ImportError;
use super::source::check_status;

/// Some avatar hosts refuse clients that do not look like a browser
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Downloads avatar images
#[async_trait]
pub trait AvatarFetcher: Send + Sync {
    /// Fetch the raw bytes behind an avatar URL
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImportError>;
}

/// Avatar fetcher over HTTP(S)
#[derive(Debug, Clone)]
pub struct HttpAvatarFetcher {
    client: reqwest::Client,
}

impl HttpAvatarFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AvatarFetcher for HttpAvatarFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ImportError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;
        let response = check_status(response)?;

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), "avatar downloaded");
        Ok(bytes.to_vec())
    }
}

/// File name for a downloaded avatar: remote id plus the URL's extension
///
/// Characters outside `[A-Za-z0-9_-]` are dropped from the id; an id with
/// nothing left falls back to `member-{index}`.
pub(crate) fn avatar_file_name(remote_id: &str, url: &str, index: usize) -> String {
    let mut stem: String = remote_id
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        stem = format!("member-{index}");
    }

    match url_extension(url) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn url_extension(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let last_segment = parsed.path_segments()?.next_back()?;
    let ext = Path::new(last_segment).extension()?.to_str()?;

    let valid = !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

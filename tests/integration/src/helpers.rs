//! Test helpers for integration tests
//!
//! Spawns an in-process mock of the remote member APIs and builds importers
//! backed by an in-memory SQLite store.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use plural_db::{create_memory_pool, SqliteMemberRepository, SqliteMessageRepository};
use plural_service::import::HttpAvatarFetcher;
use plural_service::{Importer, ServiceContext};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{
    pluralkit_members, simplyplural_members, PK_SYSTEM, PNG_BYTES, SP_ACCOUNT, SP_TOKEN,
};

/// Mock remote API instance that manages lifecycle
pub struct MockRemote {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

#[derive(Clone)]
struct MockState {
    base_url: Arc<str>,
}

impl MockRemote {
    /// Start the mock on an ephemeral port
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let state = MockState {
            base_url: format!("http://{addr}").into(),
        };
        let app = Router::new()
            .route("/v2/systems/:id/members", get(pluralkit_members_handler))
            .route("/v1/members/:id", get(simplyplural_members_handler))
            .route("/avatars/:file", get(avatar_handler))
            .with_state(state);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    /// Get base URL for the mock
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn pluralkit_members_handler(
    State(state): State<MockState>,
    UrlPath(id): UrlPath<String>,
) -> Response {
    if id != PK_SYSTEM {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(pluralkit_members(&state.base_url)).into_response()
}

async fn simplyplural_members_handler(
    State(state): State<MockState>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .is_some_and(|value| value == SP_TOKEN);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if id != SP_ACCOUNT {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(simplyplural_members(&state.base_url)).into_response()
}

async fn avatar_handler(UrlPath(file): UrlPath<String>, headers: HeaderMap) -> Response {
    // The CDN the importer talks to refuses clients without a browser agent
    let browser = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|agent| agent.starts_with("Mozilla/"));
    if !browser {
        return StatusCode::FORBIDDEN.into_response();
    }

    match file.as_str() {
        "alex.png" | "juno.png" => ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES).into_response(),
        "text.png" => "definitely not an image".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Service context over a fresh in-memory SQLite store
pub async fn memory_context(storage_root: &Path) -> Result<ServiceContext> {
    let pool = create_memory_pool().await?;
    Ok(ServiceContext::new(
        Arc::new(SqliteMemberRepository::new(pool.clone())),
        Some(Arc::new(SqliteMessageRepository::new(pool))),
        storage_root,
    ))
}

/// HTTP client used against the mock
pub fn test_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?)
}

/// Importer with real HTTP avatar downloads and no inter-download pause
pub fn http_importer(ctx: &ServiceContext) -> Result<Importer> {
    Ok(Importer::new(
        ctx.clone(),
        Arc::new(HttpAvatarFetcher::new(test_client()?)),
        Duration::ZERO,
    ))
}

//! Application state
//!
//! Owns the member store for the lifetime of the process: opened once at
//! startup, closed (and for the flat-file backend, saved) at shutdown.

use std::sync::Arc;

use plural_common::{AppConfig, AppError, AppResult, StorageBackend};
use plural_db::{
    create_pool, FileMemberRepository, SqliteDiaryRepository, SqliteMemberRepository,
    SqliteMessageRepository,
};
use plural_service::import::{http_client, HttpAvatarFetcher};
use plural_service::{Importer, ServiceContext, ServiceContextBuilder};
use tracing::info;

/// Application state shared by all command handlers
pub struct AppState {
    /// Service context containing all dependencies
    service_context: ServiceContext,
    /// Application configuration
    config: Arc<AppConfig>,
    /// Set for the flat-file backend, which must be saved at shutdown
    file_store: Option<Arc<FileMemberRepository>>,
}

impl AppState {
    /// Open the configured store
    ///
    /// # Errors
    /// Failing to open storage is fatal for the process.
    pub async fn open(config: AppConfig) -> AppResult<Self> {
        let data_dir = &config.storage.data_dir;
        tokio::fs::create_dir_all(data_dir).await?;

        let builder = ServiceContextBuilder::new().storage_root(data_dir.clone());

        let (builder, file_store) = match config.storage.backend {
            StorageBackend::Sqlite => {
                info!(url = %config.database.url, "opening SQLite store");
                let db_config = plural_db::DatabaseConfig {
                    url: config.database.url.clone(),
                    max_connections: config.database.max_connections,
                    ..Default::default()
                };
                let pool = create_pool(&db_config)
                    .await
                    .map_err(|e| AppError::Storage(e.to_string()))?;

                let builder = builder
                    .member_repo(Arc::new(SqliteMemberRepository::new(pool.clone())))
                    .message_repo(Arc::new(SqliteMessageRepository::new(pool.clone())))
                    .diary_repo(Arc::new(SqliteDiaryRepository::new(pool)));
                (builder, None)
            }
            StorageBackend::File => {
                let path = &config.storage.settings_file;
                info!(path = %path.display(), "opening settings file store");
                let repo = Arc::new(FileMemberRepository::open(path).await?);
                (builder.member_repo(repo.clone()), Some(repo))
            }
        };

        Ok(Self {
            service_context: builder.build()?,
            config: Arc::new(config),
            file_store,
        })
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// HTTP client for the remote services
    pub fn http_client(&self) -> AppResult<reqwest::Client> {
        Ok(http_client(self.config.import.http_timeout)?)
    }

    /// Build an importer that downloads avatars over HTTP
    pub fn importer(&self) -> AppResult<Importer> {
        let fetcher = HttpAvatarFetcher::new(self.http_client()?);
        Ok(Importer::new(
            self.service_context.clone(),
            Arc::new(fetcher),
            self.config.import.avatar_delay,
        ))
    }

    /// Close the store, saving the settings file for the flat-file backend
    pub async fn shutdown(&self) -> AppResult<()> {
        if let Some(store) = &self.file_store {
            store.save().await?;
            info!(path = %store.path().display(), "settings file saved");
        }
        Ok(())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("backend", &self.config.storage.backend)
            .finish_non_exhaustive()
    }
}

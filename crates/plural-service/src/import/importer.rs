//! Import orchestration

use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::services::{validate_avatar_path, MemberService, ServiceContext};

use super::avatar::{avatar_file_name, AvatarFetcher};
use super::error::ImportError;
use super::report::ImportReport;
use super::source::{MemberSource, RemoteMember};
use super::state::ImportState;

/// Replaces the member store with a remote member list
///
/// Clones share the published state.
#[derive(Clone)]
pub struct Importer {
    ctx: ServiceContext,
    avatars: Arc<dyn AvatarFetcher>,
    avatar_delay: Duration,
    state: Arc<watch::Sender<ImportState>>,
}

impl Importer {
    /// Create an importer; `avatar_delay` is the pause after every avatar download
    pub fn new(
        ctx: ServiceContext,
        avatars: Arc<dyn AvatarFetcher>,
        avatar_delay: Duration,
    ) -> Self {
        let (state, _) = watch::channel(ImportState::Idle);
        Self {
            ctx,
            avatars,
            avatar_delay,
            state: Arc::new(state),
        }
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<ImportState> {
        self.state.subscribe()
    }

    /// Current state
    pub fn state(&self) -> ImportState {
        self.state.borrow().clone()
    }

    /// Stage an import and wait for the user to confirm the destructive replace
    pub fn prepare(&self, source: Box<dyn MemberSource>) -> PendingImport {
        self.set_state(ImportState::AwaitingConfirmation);
        PendingImport {
            importer: self.clone(),
            source,
        }
    }

    fn set_state(&self, state: ImportState) {
        debug!(state = state.label(), "import state changed");
        self.state.send_replace(state);
    }

    #[instrument(skip_all, fields(service = source.service_name()))]
    async fn run(
        &self,
        source: &dyn MemberSource,
        cancel: &CancellationToken,
    ) -> Result<ImportReport, ImportError> {
        checkpoint(cancel)?;
        self.set_state(ImportState::Fetching);
        let body = until_cancelled(cancel, source.fetch()).await?;

        checkpoint(cancel)?;
        self.set_state(ImportState::Parsing);
        let (records, skipped) = prepare_records(source.parse(&body)?);

        let mut report = ImportReport {
            service: source.service_name().to_string(),
            skipped,
            ..ImportReport::default()
        };

        // Downloads land here until the new member set is committed
        let root = self.ctx.storage_root();
        tokio::fs::create_dir_all(root).await?;
        let staging = tempfile::Builder::new()
            .prefix(".import-")
            .tempdir_in(root)?;

        let total = records.len();
        self.set_state(ImportState::Replacing { done: 0, total });

        let mut members = Vec::with_capacity(total);
        for (index, record) in records.into_iter().enumerate() {
            checkpoint(cancel)?;

            let avatar_path = match record.avatar_url.as_deref().map(str::trim) {
                Some(url) if !url.is_empty() => {
                    let result = until_cancelled(
                        cancel,
                        self.download_avatar(staging.path(), &record.remote_id, url, index),
                    )
                    .await;
                    until_cancelled(cancel, async {
                        tokio::time::sleep(self.avatar_delay).await;
                        Ok::<_, ImportError>(())
                    })
                    .await?;

                    match result {
                        Ok(reference) => Some(reference),
                        Err(ImportError::Cancelled) => return Err(ImportError::Cancelled),
                        Err(e) => {
                            warn!(member = %record.name, error = %e, "avatar skipped");
                            report.record_failure(&e);
                            None
                        }
                    }
                }
                _ => None,
            };

            members.push(record.into_new_member(avatar_path));
            self.set_state(ImportState::Replacing { done: index + 1, total });
        }

        checkpoint(cancel)?;
        let stored = MemberService::new(&self.ctx)
            .replace_all_staged(&members, staging.path())
            .await?;
        report.imported = stored.len();

        Ok(report)
    }

    /// Download one avatar into `staging` and return its reference
    async fn download_avatar(
        &self,
        staging: &Path,
        remote_id: &str,
        url: &str,
        index: usize,
    ) -> Result<String, ImportError> {
        let bytes = self.avatars.fetch(url).await?;

        let file_name = avatar_file_name(remote_id, url, index);
        tokio::fs::write(staging.join(&file_name), &bytes).await?;

        validate_avatar_path(staging, &file_name).map_err(ImportError::InvalidAvatar)?;
        Ok(file_name)
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), ImportError> {
    if cancel.is_cancelled() {
        return Err(ImportError::Cancelled);
    }
    Ok(())
}

/// Run `work` unless the token fires first
async fn until_cancelled<T>(
    cancel: &CancellationToken,
    work: impl Future<Output = Result<T, ImportError>>,
) -> Result<T, ImportError> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(ImportError::Cancelled),
        result = work => result,
    }
}

/// An import waiting for confirmation
pub struct PendingImport {
    importer: Importer,
    source: Box<dyn MemberSource>,
}

impl PendingImport {
    pub fn service_name(&self) -> &'static str {
        self.source.service_name()
    }

    /// Warning to show before the user confirms
    pub fn warning(&self) -> String {
        format!(
            "WARNING: This will erase all system data to import from {}. \
             Make sure you know what you're doing before you confirm.",
            self.service_name()
        )
    }

    /// Abandon the import; nothing has been touched
    pub fn cancel(self) {
        info!(service = self.service_name(), "import cancelled before start");
        self.importer.set_state(ImportState::Idle);
    }

    /// Run the import to completion on the current task
    ///
    /// The store and the avatar files it references are only touched by the
    /// final commit, so any error (including cancellation) leaves the previous
    /// member set in place.
    pub async fn confirm(self, cancel: CancellationToken) -> Result<ImportReport, ImportError> {
        let result = self.importer.run(self.source.as_ref(), &cancel).await;

        match &result {
            Ok(report) => {
                info!(
                    service = %report.service,
                    imported = report.imported,
                    skipped = report.skipped,
                    avatar_failures = report.avatar_failures,
                    "import finished"
                );
                self.importer.set_state(ImportState::Done(report.clone()));
            }
            Err(e) => {
                warn!(error = %e, "import failed");
                self.importer.set_state(ImportState::Failed(e.to_string()));
            }
        }

        result
    }

    /// Run the import on a background task
    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<Result<ImportReport, ImportError>> {
        tokio::spawn(self.confirm(cancel))
    }
}

/// Drop records without a usable name and make the remaining names unique
///
/// Returns the records to import and the number skipped.
fn prepare_records(remote: Vec<RemoteMember>) -> (Vec<RemoteMember>, usize) {
    let mut skipped = 0;
    let mut taken = HashSet::new();
    let mut records = Vec::with_capacity(remote.len());

    for mut record in remote {
        let name = record.name.trim().to_string();
        if name.is_empty() {
            skipped += 1;
            continue;
        }

        let mut unique = name.clone();
        let mut n = 2;
        while taken.contains(&unique) {
            unique = format!("{name} ({n})");
            n += 1;
        }
        taken.insert(unique.clone());

        record.name = unique;
        records.push(record);
    }

    (records, skipped)
}

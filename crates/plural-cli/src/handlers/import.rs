//! Import command handlers
//!
//! Remote imports run on a background task; Ctrl-C requests cancellation and
//! leaves the store untouched unless the final commit already happened.

use std::io::{BufRead, Write};

use plural_common::{AppError, AppResult};
use plural_service::{
    CancellationToken, ExportService, ImportReport, ImportState, MemberSource,
    PluralKitExportSource, PluralKitSource, SimplyPluralSource,
};
use tracing::{info, warn};

use crate::cli::{ConfirmArgs, ImportCommand};
use crate::state::AppState;

const DESTRUCTIVE_FILE_WARNING: &str =
    "WARNING: This will erase all system data and replace it with the members of the file.";

pub async fn handle(
    state: &AppState,
    command: ImportCommand,
    out: &mut dyn Write,
) -> AppResult<()> {
    let import = &state.config().import;

    match command {
        ImportCommand::Pluralkit { system_id, confirm } => {
            let source = PluralKitSource::new(state.http_client()?, &import.pluralkit_url, &system_id)?;
            run_remote(state, Box::new(source), confirm, out).await
        }
        ImportCommand::Simplyplural {
            account_id,
            token,
            confirm,
        } => {
            let source = SimplyPluralSource::new(
                state.http_client()?,
                &import.simplyplural_url,
                &account_id,
                &token,
            )?;
            run_remote(state, Box::new(source), confirm, out).await
        }
        ImportCommand::PluralkitExport { path, confirm } => {
            let source = PluralKitExportSource::new(path);
            run_remote(state, Box::new(source), confirm, out).await
        }
        ImportCommand::File { path, confirm } => {
            if !ask(DESTRUCTIVE_FILE_WARNING, confirm).await? {
                writeln!(out, "Import cancelled; nothing was changed.")?;
                return Ok(());
            }
            let imported = ExportService::new(state.service_context())
                .import_from(&path)
                .await?;
            writeln!(
                out,
                "Imported {} members from {} ({} missing avatars cleared)",
                imported.members.len(),
                path.display(),
                imported.cleared_avatars
            )?;
            Ok(())
        }
    }
}

async fn run_remote(
    state: &AppState,
    source: Box<dyn MemberSource>,
    confirm: ConfirmArgs,
    out: &mut dyn Write,
) -> AppResult<()> {
    let importer = state.importer()?;
    let pending = importer.prepare(source);

    if !ask(&pending.warning(), confirm).await? {
        pending.cancel();
        writeln!(out, "Import cancelled; nothing was changed.")?;
        return Ok(());
    }

    let mut states = importer.subscribe();
    let cancel = CancellationToken::new();
    let mut handle = pending.spawn(cancel.clone());

    let result = loop {
        tokio::select! {
            joined = &mut handle => break joined.map_err(AppError::internal)?,
            changed = states.changed() => {
                if changed.is_ok() {
                    if let ImportState::Replacing { done, total } = *states.borrow_and_update() {
                        info!(done, total, "importing members");
                    }
                }
            }
            _ = tokio::signal::ctrl_c(), if !cancel.is_cancelled() => {
                warn!("cancelling import");
                cancel.cancel();
            }
        }
    };

    let report = result?;
    write_report(out, &report)?;
    Ok(())
}

fn write_report(out: &mut dyn Write, report: &ImportReport) -> AppResult<()> {
    writeln!(
        out,
        "Imported {} members from {} ({} skipped, {} without avatar)",
        report.imported, report.service, report.skipped, report.avatar_failures
    )?;
    if let Some(error) = &report.first_error {
        writeln!(out, "First problem: {error}")?;
    }
    Ok(())
}

/// Show the warning and wait for the user to type `yes`
async fn ask(warning: &str, confirm: ConfirmArgs) -> AppResult<bool> {
    eprintln!("{warning}");
    if confirm.yes {
        return Ok(true);
    }
    eprint!("Type 'yes' to continue: ");

    let answer = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).map(|_| line)
    })
    .await
    .map_err(AppError::internal)??;

    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

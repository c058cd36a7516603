//! Settings file export

use std::io::Write;
use std::path::PathBuf;

use plural_common::{AppError, AppResult};
use plural_service::{export_settings_file, ExportService, MemberService};

use crate::state::AppState;

/// Write the members as a settings file to `path`, or to `out` when no path is given
pub async fn handle(state: &AppState, path: Option<PathBuf>, out: &mut dyn Write) -> AppResult<()> {
    match path {
        Some(path) => {
            let count = ExportService::new(state.service_context())
                .export_to(&path)
                .await?;
            writeln!(out, "Exported {count} members to {}", path.display())?;
        }
        None => {
            let members = MemberService::new(state.service_context()).list().await?;
            let file = export_settings_file(&members);
            let json = serde_json::to_string_pretty(&file).map_err(AppError::internal)?;
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

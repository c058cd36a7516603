//! Theme file validation

use std::io::Write;

use plural_common::AppResult;
use plural_core::parse_themes;

use crate::cli::ThemesCommand;

pub async fn handle(command: ThemesCommand, out: &mut dyn Write) -> AppResult<()> {
    match command {
        ThemesCommand::Check { path } => {
            let raw = tokio::fs::read_to_string(&path).await?;
            let themes = parse_themes(&raw)?;
            for theme in &themes {
                let kind = if theme.is_dark() { "dark" } else { "light" };
                writeln!(out, "{} ({kind}, background {})", theme.name, theme.colors.bg)?;
            }
            writeln!(out, "{} themes OK", themes.len())?;
        }
    }
    Ok(())
}

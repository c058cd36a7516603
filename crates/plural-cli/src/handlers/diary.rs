//! Diary command handlers

use std::io::Write;

use plural_common::AppResult;
use plural_core::{DiaryEntry, DiaryUpdate};
use plural_service::DiaryService;

use crate::cli::DiaryCommand;
use crate::state::AppState;

pub async fn handle(state: &AppState, command: DiaryCommand, out: &mut dyn Write) -> AppResult<()> {
    let service = DiaryService::new(state.service_context());

    match command {
        DiaryCommand::Add {
            member,
            content,
            title,
        } => {
            let entry = service.add(member, title.as_deref(), &content).await?;
            writeln!(out, "Added diary entry {} for {}", entry.id, entry.member_name)?;
        }
        DiaryCommand::List { member, limit } => {
            write_entries(out, &service.list(member, limit).await?)?;
        }
        DiaryCommand::Show { id } => {
            let entry = service.get(id).await?;
            writeln!(out, "{}", heading(&entry))?;
            writeln!(out)?;
            writeln!(out, "{}", entry.content)?;
        }
        DiaryCommand::Edit { id, title, content } => {
            let entry = service.update(id, DiaryUpdate { title, content }).await?;
            writeln!(out, "Updated diary entry {}", entry.id)?;
        }
        DiaryCommand::Delete { id } => {
            service.delete(id).await?;
            writeln!(out, "Deleted diary entry {id}")?;
        }
        DiaryCommand::Search { term, member } => {
            write_entries(out, &service.search(&term, member).await?)?;
        }
    }

    Ok(())
}

fn write_entries(out: &mut dyn Write, entries: &[DiaryEntry]) -> AppResult<()> {
    if entries.is_empty() {
        writeln!(out, "No diary entries.")?;
    }
    for entry in entries {
        writeln!(out, "{}", heading(entry))?;
    }
    Ok(())
}

/// `#id  YYYY-MM-DD HH:MM  author  title`
fn heading(entry: &DiaryEntry) -> String {
    format!(
        "#{}  {}  {}  {}",
        entry.id,
        entry.created_at.format("%Y-%m-%d %H:%M"),
        entry.member_name,
        entry.title.as_deref().unwrap_or("(untitled)")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tests::config_for;
    use plural_service::MemberService;

    async fn run(state: &AppState, command: DiaryCommand) -> AppResult<String> {
        let mut out = Vec::new();
        handle(state, command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_add_edit_search_delete() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::open(config_for(dir.path(), "sqlite")).await.unwrap();
        let alex = MemberService::new(state.service_context())
            .create("Alex")
            .await
            .unwrap();

        let added = run(
            &state,
            DiaryCommand::Add {
                member: alex.id,
                content: "Quiet evening".to_string(),
                title: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(added.trim(), "Added diary entry 1 for Alex");

        run(
            &state,
            DiaryCommand::Edit {
                id: 1,
                title: Some("Sunday".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

        let shown = run(&state, DiaryCommand::Show { id: 1 }).await.unwrap();
        assert!(shown.lines().next().unwrap().ends_with("Alex  Sunday"));
        assert!(shown.contains("Quiet evening"));

        let found = run(
            &state,
            DiaryCommand::Search {
                term: "quiet".to_string(),
                member: None,
            },
        )
        .await
        .unwrap();
        assert!(found.starts_with("#1  "));

        run(&state, DiaryCommand::Delete { id: 1 }).await.unwrap();
        let listed = run(
            &state,
            DiaryCommand::List {
                member: None,
                limit: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(listed.trim(), "No diary entries.");
    }

    #[tokio::test]
    async fn test_error_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::open(config_for(dir.path(), "sqlite")).await.unwrap();

        let err = run(&state, DiaryCommand::Show { id: 3 }).await.unwrap_err();
        assert_eq!(err.exit_code(), 3);

        let err = run(
            &state,
            DiaryCommand::Edit {
                id: 3,
                title: None,
                content: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn test_file_backend_has_no_diary() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::open(config_for(dir.path(), "file")).await.unwrap();

        let err = run(
            &state,
            DiaryCommand::List {
                member: None,
                limit: None,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}

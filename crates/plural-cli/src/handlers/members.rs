//! Member command handlers

use std::io::Write;

use plural_common::{AppError, AppResult};
use plural_core::{Member, MemberField};
use plural_service::MemberService;

use crate::cli::MembersCommand;
use crate::state::AppState;

pub async fn handle(
    state: &AppState,
    command: MembersCommand,
    out: &mut dyn Write,
) -> AppResult<()> {
    let service = MemberService::new(state.service_context());

    match command {
        MembersCommand::List => {
            let members = service.list().await?;
            if members.is_empty() {
                writeln!(out, "No members yet.")?;
            }
            for member in &members {
                writeln!(out, "{}", summary_line(member))?;
            }
        }
        MembersCommand::Show { id } => {
            let member = service.get(id).await?;
            let json = serde_json::to_string_pretty(&member).map_err(AppError::internal)?;
            writeln!(out, "{json}")?;
        }
        MembersCommand::Create { name } => {
            let member = match name {
                Some(name) => service.create(&name).await?,
                None => service.create_placeholder().await?,
            };
            writeln!(out, "Created member {} ({})", member.id, member.name)?;
        }
        MembersCommand::Set { id, field, value } => {
            let field = MemberField::parse(&field, &value)?;
            let name = field.name();
            let member = service.update_field(id, field).await?;
            writeln!(out, "Updated {name} of member {} ({})", member.id, member.name)?;
        }
    }

    Ok(())
}

/// `id  name  pronouns  tags` with empty columns shown as `-`
fn summary_line(member: &Member) -> String {
    let tags: Vec<String> = member
        .proxy_tags
        .iter()
        .filter(|t| t.is_usable())
        .map(|t| {
            let prefix = t.prefix.as_deref().unwrap_or("");
            let suffix = t.suffix.as_deref().unwrap_or("");
            format!("{prefix}text{suffix}")
        })
        .collect();

    format!(
        "{:>4}  {}  {}  {}",
        member.id.into_inner(),
        member.name,
        member.pronouns.as_deref().unwrap_or("-"),
        if tags.is_empty() { "-".to_string() } else { tags.join(" ") }
    )
}

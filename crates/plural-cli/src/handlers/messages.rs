//! Chat log command handlers

use std::io::Write;

use plural_common::AppResult;
use plural_core::Message;
use plural_service::MessageService;

use crate::cli::MessagesCommand;
use crate::state::AppState;

pub async fn handle(
    state: &AppState,
    command: MessagesCommand,
    out: &mut dyn Write,
) -> AppResult<()> {
    let service = MessageService::new(state.service_context());

    match command {
        MessagesCommand::Send { text, as_member } => {
            let message = service.send(&text, as_member).await?;
            writeln!(out, "{}", log_line(&message))?;
        }
        MessagesCommand::List { limit } => {
            let mut messages = service.recent(limit).await?;
            // Oldest first reads like a chat log
            messages.reverse();
            for message in &messages {
                writeln!(out, "{}", log_line(message))?;
            }
        }
    }

    Ok(())
}

fn log_line(message: &Message) -> String {
    format!("[{}] #{}: {}", message.timestamp, message.member_id, message.text)
}

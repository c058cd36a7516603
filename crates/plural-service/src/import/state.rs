//! Import state machine

use super::report::ImportReport;

/// Observable state of the importer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    /// The destructive-action warning is shown; nothing has been touched
    AwaitingConfirmation,
    Fetching,
    Parsing,
    /// Downloading avatars, then committing the new member set
    Replacing { done: usize, total: usize },
    Done(ImportReport),
    Failed(String),
}

impl ImportState {
    /// Whether the import has reached a terminal state
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done(_) | Self::Failed(_))
    }

    /// Whether an import is currently running
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Fetching | Self::Parsing | Self::Replacing { .. })
    }

    /// Short label for progress output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Replacing { .. } => "replacing",
            Self::Done(_) => "done",
            Self::Failed(_) => "failed",
        }
    }
}

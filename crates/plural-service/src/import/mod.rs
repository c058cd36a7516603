//! Remote member import
//!
//! Replaces the whole member store with the member list of a PluralKit
//! system, a Simply Plural account, or a PluralKit export file.
//!
//! A running import is stopped through a [`CancellationToken`]; the token
//! interrupts in-flight requests and the pause between avatar downloads.
//!
//! ```text
//! Idle -> AwaitingConfirmation -> Fetching -> Parsing -> Replacing -> Done
//!              |                     |           |           |
//!              v                     +-----------+-----------+--> Failed
//!             Idle (cancelled, nothing touched)
//! ```

mod avatar;
mod error;
mod importer;
mod pk_export;
mod pluralkit;
mod report;
mod simplyplural;
mod source;
mod state;

pub use avatar::{AvatarFetcher, HttpAvatarFetcher, BROWSER_USER_AGENT};
pub use error::ImportError;
pub use importer::{Importer, PendingImport};
pub use pk_export::PluralKitExportSource;
pub use pluralkit::PluralKitSource;
pub use report::ImportReport;
pub use simplyplural::SimplyPluralSource;
pub use source::{http_client, validate_identifier, MemberSource, RemoteMember};
pub use state::ImportState;
pub use tokio_util::sync::CancellationToken;

//! # plural-service
//!
//! Application layer: member store rules (avatar validation, mutation guard),
//! proxy-attributed messages, diary entries, settings export, and the remote
//! member importer.

pub mod import;
pub mod services;

pub use import::{
    CancellationToken, ImportError, ImportReport, ImportState, Importer, MemberSource,
    PendingImport, PluralKitExportSource, PluralKitSource, RemoteMember, SimplyPluralSource,
};
pub use services::{
    export_settings_file, resolve_avatar_path, validate_avatar_path, DiaryService, ExportService,
    MemberService, MessageService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SettingsImport,
};

//! Import Integration Tests
//!
//! Runs the real PluralKit and Simply Plural sources and the HTTP avatar
//! fetcher against an in-process mock of both services.
//!
//! Run with: cargo test -p integration-tests --test import_tests

use async_trait::async_trait;
use integration_tests::{
    fixtures::*, http_importer, memory_context, test_client, MockRemote,
};
use plural_core::ProxyTag;
use plural_service::{
    CancellationToken, ImportError, ImportState, MemberService, MemberSource, MessageService,
    PluralKitExportSource, PluralKitSource, RemoteMember, SimplyPluralSource,
};

// ============================================================================
// PluralKit
// ============================================================================

#[tokio::test]
async fn test_pluralkit_import_replaces_store() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();

    // Existing data is wiped, chat log included
    let old = MemberService::new(&ctx).create("Old").await.unwrap();
    MessageService::new(&ctx).send("hello", Some(old.id)).await.unwrap();

    let importer = http_importer(&ctx).unwrap();
    let source = PluralKitSource::new(test_client().unwrap(), &remote.base_url(), PK_SYSTEM).unwrap();
    let report = importer
        .prepare(Box::new(source))
        .confirm(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.service, "PluralKit");
    assert_eq!(report.imported, 3);
    assert_eq!(report.avatar_failures, 1);
    assert!(report.first_error.unwrap().contains("404"));
    assert!(matches!(importer.state(), ImportState::Done(_)));

    let members = MemberService::new(&ctx).list().await.unwrap();
    let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Alex", "Sam", "Rin"]);

    let alex = &members[0];
    assert_eq!(alex.pronouns.as_deref(), Some("they/them"));
    assert_eq!(alex.color.as_deref(), Some("#ff8800"));
    assert_eq!(alex.avatar_path.as_deref(), Some("aaaaa.png"));
    assert_eq!(alex.proxy_tags, vec![ProxyTag::prefix("a:")]);
    assert!(storage.path().join("aaaaa.png").exists());

    // The failed download leaves the member without an avatar
    assert_eq!(members[1].avatar_path, None);
    assert_eq!(members[1].proxy_tags, vec![ProxyTag::suffix("-s")]);

    assert_eq!(MessageService::new(&ctx).count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_pluralkit_unknown_system_keeps_store() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();
    MemberService::new(&ctx).create("Keep").await.unwrap();

    let importer = http_importer(&ctx).unwrap();
    let source = PluralKitSource::new(test_client().unwrap(), &remote.base_url(), "zzzzz").unwrap();
    let err = importer
        .prepare(Box::new(source))
        .confirm(CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Status { status: 404, .. }));
    assert!(matches!(importer.state(), ImportState::Failed(_)));

    let members = MemberService::new(&ctx).list().await.unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Keep");
}

#[tokio::test]
async fn test_pluralkit_export_file_import() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();
    MemberService::new(&ctx).create("Old").await.unwrap();

    let path = storage.path().join("pk-export.json");
    std::fs::write(&path, pluralkit_export(&remote.base_url()).to_string()).unwrap();

    let importer = http_importer(&ctx).unwrap();
    let report = importer
        .prepare(Box::new(PluralKitExportSource::new(&path)))
        .confirm(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.service, "PluralKit export");
    assert_eq!(report.imported, 2);
    assert_eq!(report.avatar_failures, 1);

    let members = MemberService::new(&ctx).list().await.unwrap();
    assert_eq!(members[0].name, "Alex");
    assert_eq!(members[0].description.as_deref(), Some("Original name: alex"));
    assert_eq!(members[0].avatar_path.as_deref(), Some("aaaaa.png"));
    assert!(storage.path().join("aaaaa.png").is_file());
    assert_eq!(members[1].avatar_path, None);
    assert!(!storage.path().join("ddddd.png").exists());
}

// ============================================================================
// Simply Plural
// ============================================================================

#[tokio::test]
async fn test_simplyplural_import_sends_token() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();

    let importer = http_importer(&ctx).unwrap();
    let source = SimplyPluralSource::new(
        test_client().unwrap(),
        &remote.base_url(),
        SP_ACCOUNT,
        SP_TOKEN,
    )
    .unwrap();
    let report = importer
        .prepare(Box::new(source))
        .confirm(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.imported, 2);
    assert_eq!(report.avatar_failures, 0);

    let members = MemberService::new(&ctx).list().await.unwrap();
    assert_eq!(members[0].name, "Juno");
    assert_eq!(members[0].color.as_deref(), Some("#3366ff"));
    assert_eq!(members[0].description.as_deref(), Some("front desk"));
    assert_eq!(members[0].avatar_path.as_deref(), Some("sp-1.png"));
    assert_eq!(members[1].name, "Kai");
    assert_eq!(members[1].avatar_path, None);
}

#[tokio::test]
async fn test_simplyplural_wrong_token_is_rejected() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();

    let importer = http_importer(&ctx).unwrap();
    let source = SimplyPluralSource::new(
        test_client().unwrap(),
        &remote.base_url(),
        SP_ACCOUNT,
        "wrong",
    )
    .unwrap();
    let err = importer
        .prepare(Box::new(source))
        .confirm(CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ImportError::Status { status: 401, .. }));
    assert_eq!(MemberService::new(&ctx).count().await.unwrap(), 0);
}

// ============================================================================
// Avatars and cancellation
// ============================================================================

/// Source with a fixed member list, fetched without any network access
struct StaticSource(Vec<RemoteMember>);

#[async_trait]
impl MemberSource for StaticSource {
    fn service_name(&self) -> &'static str {
        "Static"
    }

    async fn fetch(&self) -> Result<String, ImportError> {
        Ok(String::new())
    }

    fn parse(&self, _body: &str) -> Result<Vec<RemoteMember>, ImportError> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_non_image_avatar_is_discarded() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();

    let source = StaticSource(vec![RemoteMember {
        remote_id: "txt".to_string(),
        name: "Texty".to_string(),
        avatar_url: Some(format!("{}/avatars/text.png", remote.base_url())),
        ..RemoteMember::default()
    }]);

    let importer = http_importer(&ctx).unwrap();
    let report = importer
        .prepare(Box::new(source))
        .confirm(CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.imported, 1);
    assert_eq!(report.avatar_failures, 1);
    assert!(!storage.path().join("txt.png").exists());

    let members = MemberService::new(&ctx).list().await.unwrap();
    assert_eq!(members[0].avatar_path, None);
}

#[tokio::test]
async fn test_cancel_before_run_keeps_store() {
    let remote = MockRemote::start().await.unwrap();
    let storage = tempfile::tempdir().unwrap();
    let ctx = memory_context(storage.path()).await.unwrap();
    MemberService::new(&ctx).create("Keep").await.unwrap();

    let importer = http_importer(&ctx).unwrap();
    let source = PluralKitSource::new(test_client().unwrap(), &remote.base_url(), PK_SYSTEM).unwrap();
    let pending = importer.prepare(Box::new(source));
    assert_eq!(importer.state(), ImportState::AwaitingConfirmation);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = pending.spawn(cancel).await.unwrap().unwrap_err();

    assert!(matches!(err, ImportError::Cancelled));
    assert_eq!(MemberService::new(&ctx).count().await.unwrap(), 1);
}

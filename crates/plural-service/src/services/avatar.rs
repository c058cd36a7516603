//! Avatar reference validation
//!
//! An avatar reference is either empty (no avatar), an absolute path, or a
//! path relative to the application's storage root.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use plural_core::DomainError;
use tracing::debug;

/// Resolve a non-empty avatar reference to a filesystem path
pub fn resolve_avatar_path(storage_root: &Path, reference: &str) -> PathBuf {
    if reference.starts_with('/') || reference.starts_with(MAIN_SEPARATOR) {
        PathBuf::from(reference)
    } else {
        storage_root.join(reference)
    }
}

/// Check that an avatar reference names an existing image file
///
/// Returns `Ok(None)` for the empty reference and the resolved path otherwise.
/// The media type is sniffed from the file content, not the extension.
pub fn validate_avatar_path(
    storage_root: &Path,
    reference: &str,
) -> Result<Option<PathBuf>, DomainError> {
    if reference.is_empty() {
        return Ok(None);
    }

    let path = resolve_avatar_path(storage_root, reference);
    if !path.is_file() {
        return Err(DomainError::AvatarMissing(path.display().to_string()));
    }

    let kind = infer::get_from_path(&path)
        .map_err(|e| DomainError::StorageError(format!("{}: {e}", path.display())))?;
    let mime = kind.map_or("unknown", |k| k.mime_type());

    if !mime.starts_with("image/") {
        return Err(DomainError::AvatarNotImage {
            path: path.display().to_string(),
            mime: mime.to_string(),
        });
    }

    debug!(path = %path.display(), mime, "avatar accepted");
    Ok(Some(path))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Smallest valid PNG (1x1, transparent)
    pub(crate) const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
        0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
        0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn test_empty_reference_is_no_avatar() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(validate_avatar_path(dir.path(), "").unwrap(), None);
    }

    #[test]
    fn test_relative_reference_resolves_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alex.png"), PNG_BYTES).unwrap();

        let path = validate_avatar_path(dir.path(), "alex.png").unwrap().unwrap();
        assert_eq!(path, dir.path().join("alex.png"));
    }

    #[test]
    fn test_absolute_reference() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("abs.png");
        std::fs::write(&file, PNG_BYTES).unwrap();

        let other_root = tempfile::tempdir().unwrap();
        let reference = file.to_str().unwrap();
        assert_eq!(
            validate_avatar_path(other_root.path(), reference).unwrap(),
            Some(file.clone())
        );
        assert_eq!(resolve_avatar_path(other_root.path(), reference), file);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_avatar_path(dir.path(), "nope.png").unwrap_err();
        assert!(matches!(err, DomainError::AvatarMissing(_)));
        assert!(err.to_string().starts_with("file does not exist"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        assert!(matches!(
            validate_avatar_path(dir.path(), "sub"),
            Err(DomainError::AvatarMissing(_))
        ));
    }

    #[test]
    fn test_non_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        // Extension says image, content says text
        std::fs::write(dir.path().join("fake.png"), b"just some notes").unwrap();

        let err = validate_avatar_path(dir.path(), "fake.png").unwrap_err();
        assert!(matches!(err, DomainError::AvatarNotImage { ref mime, .. } if mime == "unknown"));
        assert!(err.to_string().starts_with("not an image"));
    }
}

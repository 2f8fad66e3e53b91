use assetlib_core::errors::{AssetLibError, ExError, ExErrorKind};
use assetlib_core::{AssetKind, ReconcileConfig, RenditionConfig, RenditionPathResolver};

#[test]
fn test_duplicate_path_verifiable_by_kind() {
    let err = AssetLibError::DuplicatePath {
        path: "photos/a.png".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicatePath);
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_PATH");
    assert_eq!(ex_err.entity_id(), Some("photos/a.png"));
}

#[test]
fn test_invalid_timestamp_structured_fields() {
    let err = AssetLibError::InvalidTimestamp {
        path: "a.png".to_string(),
        field: "date_modified".to_string(),
        value: "not-a-date".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidTimestamp);
    assert!(ex_err.message().contains("date_modified"));
    assert!(ex_err.message().contains("not-a-date"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::MissingField, "ERR_MISSING_FIELD"),
        (ExErrorKind::DuplicatePath, "ERR_DUPLICATE_PATH"),
        (ExErrorKind::InvalidTimestamp, "ERR_INVALID_TIMESTAMP"),
        (ExErrorKind::InvalidManifest, "ERR_INVALID_MANIFEST"),
        (ExErrorKind::InvalidConfig, "ERR_INVALID_CONFIG"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
    ];

    let mut codes = std::collections::BTreeSet::new();
    for (kind, code) in kinds {
        assert_eq!(kind.code(), code);
        assert!(codes.insert(code), "duplicate code {code}");
    }
}

#[test]
fn test_display_includes_op_and_entity() {
    let ex_err: ExError = AssetLibError::MissingField {
        path: "b.gif".to_string(),
        field: "content_hash".to_string(),
    }
    .into();
    let ex_err = ex_err.with_op("parse_snapshot_bytes");

    let rendered = ex_err.to_string();
    assert!(rendered.starts_with("[ERR_MISSING_FIELD]"));
    assert!(rendered.contains("parse_snapshot_bytes"));
    assert!(rendered.contains("b.gif"));
}

#[test]
fn test_bad_template_is_invalid_config() {
    let config = RenditionConfig {
        thumbnail_template: "thumb".to_string(),
        ..RenditionConfig::default()
    };
    let err = RenditionPathResolver::new(config).unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidConfig);
}

#[test]
fn test_missing_config_file_is_io() {
    let err = ReconcileConfig::load(std::path::Path::new("/nonexistent/assetlib.toml")).unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert!(ex_err.message().contains("assetlib.toml"));
}

#[test]
fn test_kind_parse_rejects_unknown() {
    let err = "video".parse::<AssetKind>().unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
}

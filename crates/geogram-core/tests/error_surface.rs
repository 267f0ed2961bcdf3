use geogram_core::errors::{ErrorInfo, GeogramError, DEGENERATE_GEOMETRY};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("index", 1)
        .with_context("reason", "example")
}

#[test]
fn shape_error_surface() {
    let err = GeogramError::Shape(sample_info("dimension-mismatch", "vertex 1 has width 3"));
    assert_eq!(err.info().code, "dimension-mismatch");
    assert_eq!(err.info().context.get("index"), Some(&"1".to_string()));
}

#[test]
fn geometry_error_surface() {
    let err = GeogramError::geometry(DEGENERATE_GEOMETRY, "zero scale factor");
    assert!(err.is_degenerate_geometry());
    let other = GeogramError::geometry("other", "not degenerate");
    assert!(!other.is_degenerate_geometry());
}

#[test]
fn unsupported_error_surface() {
    let err = GeogramError::unsupported("rotation-alignment", "only 2-D")
        .with_context("dim", 3)
        .with_hint("disable rotation alignment");
    assert_eq!(err.info().code, "rotation-alignment");
    assert_eq!(err.info().hint.as_deref(), Some("disable rotation alignment"));
}

#[test]
fn display_includes_context_and_hint() {
    let err = GeogramError::Invariant(sample_info("anchor-moved", "anchor reordered"))
        .with_hint("check normaliser");
    let text = err.to_string();
    assert!(text.starts_with("invariant violated: anchor reordered (code: anchor-moved)"));
    assert!(text.contains("index=1, reason=example"));
    assert!(text.ends_with("| hint: check normaliser"));
}

#[test]
fn serde_error_roundtrip() {
    let err = GeogramError::Serde(sample_info("json-read", "missing file"));
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"family\":\"Serde\""));
    let restored: GeogramError = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, err);
}

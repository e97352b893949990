// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use changepoint_dashboard_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Window radius must be non-negative, got -3".into());
        assert_eq!(
            err.to_string(),
            "Validation failed: Window radius must be non-negative, got -3"
        );
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("bad value".into());
        assert_eq!(err.to_string(), "Serialization error: bad value");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected token".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected token");
    }

    #[test]
    fn api() {
        let err = CoreError::Api {
            provider: "Backend".into(),
            message: "Failed to parse prices response".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (Backend): Failed to parse prices response"
        );
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn serde_json_error_becomes_deserialization() {
        let parse_err = serde_json::from_str::<Vec<i32>>("not json").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn error_trait_object_compatible() {
        // CoreError must box into the std error trait for callers that
        // aggregate errors from multiple crates.
        let err = CoreError::Network("timeout".into());
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.to_string().contains("timeout"));
    }
}

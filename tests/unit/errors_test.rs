use pwcheck::types::errors::*;

// === ServiceError Tests ===

#[test]
fn service_error_display_variants() {
    assert_eq!(
        ServiceError::Network("connection refused".to_string()).to_string(),
        "Strength service network error: connection refused"
    );
    assert_eq!(
        ServiceError::Decode("expected value at line 1".to_string()).to_string(),
        "Strength service response decode error: expected value at line 1"
    );
    assert_eq!(
        ServiceError::Rejected {
            status: 502,
            message: Some("HIBP API error".to_string())
        }
        .to_string(),
        "Strength service rejected request (502): HIBP API error"
    );
    assert_eq!(
        ServiceError::Rejected {
            status: 400,
            message: None
        }
        .to_string(),
        "Strength service rejected request (400)"
    );
}

#[test]
fn service_error_transport_classification() {
    assert!(ServiceError::Network("timeout".to_string()).is_transport());
    assert!(ServiceError::Decode("eof".to_string()).is_transport());
    assert!(!ServiceError::Rejected {
        status: 500,
        message: None
    }
    .is_transport());
}

#[test]
fn service_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ServiceError::Network("x".to_string()));
    assert!(err.source().is_none());
}

// === ClipboardError Tests ===

#[test]
fn clipboard_error_display_variants() {
    assert_eq!(
        ClipboardError::Unavailable("no display".to_string()).to_string(),
        "Clipboard unavailable: no display"
    );
    assert_eq!(
        ClipboardError::WriteFailed("owner went away".to_string()).to_string(),
        "Clipboard write failed: owner went away"
    );
}

#[test]
fn clipboard_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(ClipboardError::Unavailable("x".to_string()));
    assert!(err.source().is_none());
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
}

#[test]
fn settings_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(SettingsError::IoError("denied".to_string()));
    assert!(err.source().is_none());
}

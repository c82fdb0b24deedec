use std::fmt;

// === ServiceError ===

/// Errors returned by the Strength Service client.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// The request never produced a response (unreachable host, timeout, refused).
    Network(String),
    /// A response arrived but its body could not be decoded.
    Decode(String),
    /// The service answered with a failure status or an explicit error field.
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl ServiceError {
    /// True for failures where no usable response was received.
    ///
    /// Undecodable bodies count as transport failures: there is nothing
    /// service-reported to show the user.
    pub fn is_transport(&self) -> bool {
        matches!(self, ServiceError::Network(_) | ServiceError::Decode(_))
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "Strength service network error: {}", msg),
            ServiceError::Decode(msg) => {
                write!(f, "Strength service response decode error: {}", msg)
            }
            ServiceError::Rejected { status, message } => match message {
                Some(msg) => write!(f, "Strength service rejected request ({}): {}", status, msg),
                None => write!(f, "Strength service rejected request ({})", status),
            },
        }
    }
}

impl std::error::Error for ServiceError {}

// === ClipboardError ===

/// Errors related to writing the system clipboard.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardError {
    /// No clipboard could be opened on this system.
    Unavailable(String),
    /// The clipboard was opened but the write failed.
    WriteFailed(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(msg) => write!(f, "Clipboard unavailable: {}", msg),
            ClipboardError::WriteFailed(msg) => write!(f, "Clipboard write failed: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file exists but could not be read.
    IoError(String),
    /// The settings file is not valid settings JSON.
    SerializationError(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

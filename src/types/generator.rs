use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Query parameters of a generate request, read from the generator controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub length: u32,
    pub upper: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl GenerationParams {
    /// Encodes the parameters as `(key, value)` pairs for the query string.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("length", self.length.to_string()),
            ("upper", self.upper.to_string()),
            ("digits", self.digits.to_string()),
            ("symbols", self.symbols.to_string()),
        ]
    }
}

/// The three composition toggles of the generator panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenOption {
    Upper,
    Digits,
    Symbols,
}

impl GenOption {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upper" => Some(GenOption::Upper),
            "digits" => Some(GenOption::Digits),
            "symbols" => Some(GenOption::Symbols),
            _ => None,
        }
    }
}

/// Wire shape of the generate endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Contents of the read-only generated-password output.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GeneratedOutput {
    #[default]
    Empty,
    Password(Zeroizing<String>),
    /// Generation failed with a service-reported error.
    GenerationFailed,
    /// Generation failed in transport.
    NetworkError,
}

impl GeneratedOutput {
    pub const GENERATION_FAILED_TEXT: &'static str = "Error generating";
    pub const NETWORK_ERROR_TEXT: &'static str = "Network error";

    /// Text shown in the output field.
    pub fn display_text(&self) -> &str {
        match self {
            GeneratedOutput::Empty => "",
            GeneratedOutput::Password(pw) => pw.as_str(),
            GeneratedOutput::GenerationFailed => Self::GENERATION_FAILED_TEXT,
            GeneratedOutput::NetworkError => Self::NETWORK_ERROR_TEXT,
        }
    }

    /// The generated password, if the last generation produced one.
    pub fn password(&self) -> Option<&str> {
        match self {
            GeneratedOutput::Password(pw) if !pw.is_empty() => Some(pw.as_str()),
            _ => None,
        }
    }
}

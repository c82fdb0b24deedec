use serde::{Deserialize, Serialize};

/// Wire shape of the breach-check endpoint: either a count or an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreachResponse {
    #[serde(default)]
    pub pwned_count: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// What the breach line of the result panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum BreachStatus {
    /// Nothing displayed.
    #[default]
    Empty,
    /// The field was empty when the check was requested.
    NeedsPassword,
    /// A request is in flight.
    Checking,
    /// The service found the password in this many breaches (may be zero).
    Count(u64),
    /// The service reported a logical failure, with its message if it sent one.
    ServiceError(Option<String>),
    /// No usable response arrived.
    NetworkError,
}

use serde::{Deserialize, Deserializer, Serialize};

/// Request body shared by the analyze and breach-check endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordRequest<'a> {
    pub password: &'a str,
}

/// Successful analyze response from the Strength Service.
///
/// Fully replaces the previously displayed result when rendered. The two
/// optional fields read a JSON `null` the same as a missing key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub length: u64,
    pub entropy: f64,
    pub rating: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_common: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//! Strength Service client for pwcheck.
//!
//! The service is an external HTTP backend with three endpoints: analyze,
//! breach check and generate. Everything it computes is opaque here; this
//! module only moves JSON and classifies failures into [`ServiceError`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::types::analysis::{AnalysisResult, PasswordRequest};
use crate::types::breach::BreachResponse;
use crate::types::errors::ServiceError;
use crate::types::generator::{GenerateResponse, GenerationParams};
use crate::types::settings::ServiceSettings;

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const PWNED_PATH: &str = "/api/pwned";
pub const GENERATE_PATH: &str = "/api/generate";

/// Trait defining the Strength Service operations.
///
/// Futures are polled on the controller's single-threaded event loop,
/// so implementations need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait StrengthServiceTrait {
    async fn analyze(&self, password: &str) -> Result<AnalysisResult, ServiceError>;
    async fn check_breach(&self, password: &str) -> Result<u64, ServiceError>;
    async fn generate(&self, params: &GenerationParams) -> Result<Option<String>, ServiceError>;
}

/// Body of a failed response; only the `error` field is of interest.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Strength Service reached over HTTP with `reqwest`.
pub struct HttpStrengthService {
    client: Client,
    base_url: String,
}

impl HttpStrengthService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ServiceError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and returns the status code with the raw body.
    async fn send(&self, request: RequestBuilder) -> Result<(u16, Vec<u8>), ServiceError> {
        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;
        Ok((status, body.to_vec()))
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ServiceError> {
    serde_json::from_slice(body).map_err(|e| ServiceError::Decode(e.to_string()))
}

/// Builds the rejection for a non-2xx response, keeping the service message if any.
fn rejection(status: u16, body: &[u8]) -> ServiceError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    ServiceError::Rejected { status, message }
}

impl StrengthServiceTrait for HttpStrengthService {
    async fn analyze(&self, password: &str) -> Result<AnalysisResult, ServiceError> {
        let request = self
            .client
            .post(self.endpoint(ANALYZE_PATH))
            .json(&PasswordRequest { password });
        let (status, body) = self.send(request).await?;
        debug!(status, "analyze response");
        if !is_success(status) {
            return Err(rejection(status, &body));
        }
        decode(&body)
    }

    async fn check_breach(&self, password: &str) -> Result<u64, ServiceError> {
        let request = self
            .client
            .post(self.endpoint(PWNED_PATH))
            .json(&PasswordRequest { password });
        let (status, body) = self.send(request).await?;
        debug!(status, "pwned response");
        let reply: BreachResponse = decode(&body)?;
        match reply.pwned_count {
            Some(count) if is_success(status) => Ok(count),
            _ => Err(ServiceError::Rejected {
                status,
                message: reply.error,
            }),
        }
    }

    async fn generate(&self, params: &GenerationParams) -> Result<Option<String>, ServiceError> {
        let request = self
            .client
            .get(self.endpoint(GENERATE_PATH))
            .query(&params.query_pairs());
        let (status, body) = self.send(request).await?;
        debug!(status, "generate response");
        let reply: GenerateResponse = decode(&body)?;
        if !is_success(status) {
            return Err(ServiceError::Rejected {
                status,
                message: reply.error,
            });
        }
        Ok(reply.password)
    }
}

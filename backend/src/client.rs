use std::time::Duration;

use reqwest::StatusCode;
use shared::{AnalysisRequest, AnalysisResponse, AnalysisResult, Coordinate};

use crate::error::BackendError;

/// Client for the remote deforestation analysis service. The service is an
/// opaque `(lat, lon) -> percentage | error` box; every outcome, including
/// transport failure, comes back as an [`AnalysisResult`] so callers never
/// have to handle a second error channel.
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnalysisClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send exactly one request for the given coordinate. No retries; the
    /// user re-triggers if they want another attempt.
    pub async fn analyze(&self, coord: Coordinate) -> AnalysisResult {
        let payload = AnalysisRequest::from(coord);
        let response = match self.http.post(&self.endpoint).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("analysis request failed: {err}");
                return AnalysisResult::TransportError {
                    message: transport_message(&err),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return AnalysisResult::NotFound;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!("failed to read analysis response body: {err}");
                return AnalysisResult::TransportError {
                    message: transport_message(&err),
                };
            }
        };

        if status.is_success() {
            interpret_success_body(&body)
        } else {
            AnalysisResult::ApiError {
                code: status.as_u16(),
                detail: error_detail(&body),
            }
        }
    }
}

/// A 200 with a body that does not carry the nested numeric percentage must
/// not become a displayed number; it takes the same fallback path as a
/// network failure.
fn interpret_success_body(body: &str) -> AnalysisResult {
    match serde_json::from_str::<AnalysisResponse>(body) {
        Ok(parsed) => AnalysisResult::Success {
            percentage: parsed.deforestation_percentage.deforestation_percentage,
        },
        Err(_) => AnalysisResult::TransportError {
            message: "invalid response structure".to_string(),
        },
    }
}

/// Error bodies may carry a `detail` or `message` field; use it verbatim,
/// otherwise fall back to the raw text.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["detail", "message"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    body.to_string()
}

fn transport_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    }
}

//! Analysis backend client — the single point of entry for calls to the
//! external screening webhook.
//!
//! The webhook receives the candidate's extracted text and returns arbitrary
//! JSON; interpreting that payload is entirely the normalizer's job. Calls are
//! made exactly once per submission: a failed screening is terminal and
//! reported, never retried.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// The fields POSTed to the analysis webhook, as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub candidate_name: String,
    pub resume_text: String,
    pub interview_text: String,
}

/// Pluggable analysis backend. Carried in `AppState` as `Arc<dyn Analyzer>`
/// so tests can swap in a stub.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, BackendError>;
}

/// Production backend: one unauthenticated JSON POST to the configured
/// webhook URL.
pub struct WebhookAnalyzer {
    client: Client,
    url: String,
}

impl WebhookAnalyzer {
    pub fn new(url: String, timeout: std::time::Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            url,
        }
    }
}

#[async_trait]
impl Analyzer for WebhookAnalyzer {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, BackendError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("backend responded with {} bytes", body.len());

        // A non-JSON 2xx body is not an error here: the normalizer accepts
        // string payloads and the pipeline surfaces them as a diagnostic.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_serializes_expected_fields() {
        let request = AnalyzeRequest {
            candidate_name: "Jordan".to_string(),
            resume_text: "resume".to_string(),
            interview_text: "interview".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["candidate_name"], "Jordan");
        assert_eq!(json["resume_text"], "resume");
        assert_eq!(json["interview_text"], "interview");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_api_error_display_carries_status_and_body() {
        let err = BackendError::Api {
            status: 502,
            body: "upstream workflow failed".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream workflow failed"));
    }
}

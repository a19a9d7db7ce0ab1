// HTTP client for the prediction backend.
//
// Two endpoints are consumed: `GET /api/players?q=` for typeahead
// candidates and `POST /api/predict` for percentile projections. The
// `PlayerApi` trait is the seam the resolver and the app depend on, so
// tests can substitute scripted backends.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::protocol::{Candidate, Prediction};

/// Fallback shown when a prediction failure carries no usable message.
pub const PREDICT_FALLBACK_ERROR: &str = "Failed to get prediction";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status. For predictions the
    /// message is surfaced to the user verbatim.
    #[error("{message}")]
    Rejected { message: String },
}

#[async_trait]
pub trait PlayerApi: Send + Sync {
    /// Look up players matching a free-text query. Ordering is the
    /// backend's; the first result is the Enter-key default.
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, ApiError>;

    /// Fetch percentile projections for a resolved or raw player name.
    async fn predict(&self, name: &str) -> Result<Prediction, ApiError>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

#[async_trait]
impl PlayerApi for ApiClient {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, ApiError> {
        let response = self
            .http
            .get(format!("{}/api/players", self.base_url))
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Rejected {
                message: format!("search returned status {}", response.status()),
            });
        }
        Ok(response.json().await?)
    }

    async fn predict(&self, name: &str) -> Result<Prediction, ApiError> {
        let response = self
            .http
            .post(format!("{}/api/predict", self.base_url))
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%status, "prediction request rejected");
        Err(ApiError::Rejected {
            message: rejection_message(&body),
        })
    }
}

/// Extract the user-facing message from an error body of the form
/// `{"error": "..."}`, falling back when the body is not that shape.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| PREDICT_FALLBACK_ERROR.to_owned())
}

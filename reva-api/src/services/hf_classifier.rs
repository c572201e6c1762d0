//! Hugging Face inference API client
//!
//! Submits review text to a hosted sentiment model and returns the
//! top-scoring label candidate.

use crate::services::{ClassifierError, RawClassification, SentimentClassifier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public hosted-inference endpoint
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Binary POSITIVE/NEGATIVE sentiment model (SST-2)
pub const DEFAULT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// One label/score candidate in the inference response
#[derive(Debug, Clone, Deserialize, Serialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Inference request body
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

/// Hugging Face hosted-inference sentiment classifier
pub struct HuggingFaceClassifier {
    http_client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: Option<String>,
}

impl HuggingFaceClassifier {
    /// Create a client for the given model
    ///
    /// `base_url` is the endpoint root ([`DEFAULT_BASE_URL`] in production,
    /// a local mock server in tests). The token is optional; the public
    /// endpoint accepts anonymous requests at a reduced rate.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
            model: model.into(),
            api_token,
        })
    }

    async fn request(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let url = format!("{}/models/{}", self.base_url, self.model);

        let mut request = self
            .http_client
            .post(&url)
            .json(&InferenceRequest { inputs: text });

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api(status.as_u16(), detail));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Network(e.to_string()))?;

        parse_candidates(&body)
    }
}

/// Parse the inference response
///
/// Classification models answer `[[{label, score}, ...]]`; some deployments
/// flatten the outer list.
fn parse_candidates(body: &str) -> Result<Vec<LabelScore>, ClassifierError> {
    if let Ok(nested) = serde_json::from_str::<Vec<Vec<LabelScore>>>(body) {
        return Ok(nested.into_iter().flatten().collect());
    }

    serde_json::from_str::<Vec<LabelScore>>(body)
        .map_err(|e| ClassifierError::Parse(e.to_string()))
}

#[async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<RawClassification, ClassifierError> {
        let candidates = self.request(text).await?;

        let best = candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or(ClassifierError::EmptyResponse)?;

        tracing::debug!(
            model = %self.model,
            label = %best.label,
            score = best.score,
            "Classifier response"
        );

        Ok(RawClassification {
            label: best.label,
            score: best.score,
        })
    }
}

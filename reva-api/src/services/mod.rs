//! Review analysis services
//!
//! External model integrations and the orchestration layer. The classifier
//! and generator are dependency objects behind traits, constructed once at
//! startup and injected, so tests can substitute fakes without network
//! access.

pub mod analyzer;
pub mod gemini_generator;
pub mod hf_classifier;
pub mod keypoints;
pub mod sentiment;

pub use analyzer::{AnalyzeError, ReviewService};
pub use gemini_generator::GeminiGenerator;
pub use hf_classifier::HuggingFaceClassifier;
pub use keypoints::KeyPointExtractor;
pub use sentiment::{LabelScheme, SentimentAnalyzer};

use async_trait::async_trait;
use thiserror::Error;

/// Raw output of the external sentiment classifier
#[derive(Debug, Clone)]
pub struct RawClassification {
    /// Model vocabulary label (e.g. "POSITIVE" or "4 stars")
    pub label: String,
    /// Reported probability in [0, 1]
    pub score: f64,
}

/// Errors from the sentiment classification service
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty classification response")]
    EmptyResponse,
}

/// Errors from the text generation service
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Empty generation response")]
    EmptyResponse,
}

/// External sentiment classification service (text -> label + score)
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a piece of text, returning the model's label and score
    async fn classify(&self, text: &str) -> Result<RawClassification, ClassifierError>;
}

/// External text generation service (prompt -> free text)
#[async_trait]
pub trait KeyPointGenerator: Send + Sync {
    /// Generate text for the given prompt
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

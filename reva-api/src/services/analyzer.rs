//! Review analysis orchestration
//!
//! Validation, sentiment normalization, key-point extraction, and
//! persistence for one incoming review.

use crate::db::ReviewStore;
use crate::services::{KeyPointExtractor, SentimentAnalyzer};
use chrono::Utc;
use reva_common::db::{NewReview, Review};
use thiserror::Error;
use tracing::info;

/// Minimum review length after trimming surrounding whitespace
pub const MIN_REVIEW_CHARS: usize = 10;

/// 400 message when a required field is absent or blank
pub const MISSING_FIELDS_MSG: &str = "Missing required fields: product_name and review_text";

/// 400 message when the review text is below the minimum length
pub const REVIEW_TOO_SHORT_MSG: &str = "Review text too short (minimum 10 characters)";

/// Errors surfaced by review analysis
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Request rejected before any external call or insert
    #[error("{0}")]
    Validation(String),

    /// Insert failed; the pending transaction was rolled back
    #[error("Storage error: {0}")]
    Storage(#[from] reva_common::Error),
}

/// Orchestrates validation, analysis, and persistence of one review
///
/// Both analysis steps are fail-safe internally, so every validated
/// request produces exactly one stored row; only storage failures
/// propagate.
pub struct ReviewService {
    sentiment: SentimentAnalyzer,
    keypoints: KeyPointExtractor,
    store: ReviewStore,
}

impl ReviewService {
    pub fn new(
        sentiment: SentimentAnalyzer,
        keypoints: KeyPointExtractor,
        store: ReviewStore,
    ) -> Self {
        Self {
            sentiment,
            keypoints,
            store,
        }
    }

    /// Analyze and persist one review, returning the stored row
    pub async fn analyze(
        &self,
        product_name: &str,
        review_text: &str,
    ) -> Result<Review, AnalyzeError> {
        if product_name.trim().is_empty() {
            return Err(AnalyzeError::Validation(MISSING_FIELDS_MSG.to_string()));
        }

        if review_text.trim().chars().count() < MIN_REVIEW_CHARS {
            return Err(AnalyzeError::Validation(REVIEW_TOO_SHORT_MSG.to_string()));
        }

        let (sentiment, sentiment_score) = self.sentiment.analyze(review_text).await;
        let key_points = self.keypoints.extract(review_text).await;

        let review = self
            .store
            .insert(NewReview {
                product_name: product_name.to_string(),
                review_text: review_text.to_string(),
                sentiment,
                sentiment_score,
                key_points,
                created_at: Some(Utc::now()),
            })
            .await?;

        info!(
            id = review.id,
            sentiment = %review.sentiment,
            score = review.sentiment_score,
            "Stored analyzed review"
        );

        Ok(review)
    }
}

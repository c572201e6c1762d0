//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Three-way sentiment polarity of a review
///
/// Stored lowercase in the `sentiment` TEXT column and serialized the same
/// way in API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        };
        f.write_str(s)
    }
}

/// A persisted, fully analyzed product review
///
/// Rows are append-only: every non-id field is populated at insert and
/// never changes afterwards. `created_at` serializes as an ISO-8601 string.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Store-assigned identifier, immutable after insert
    pub id: i64,
    pub product_name: String,
    pub review_text: String,
    /// Derived polarity, never user-supplied
    pub sentiment: Sentiment,
    /// Classifier-reported confidence in [0, 1]
    pub sentiment_score: f64,
    /// Bulleted summary text, or the fixed fallback message
    pub key_points: String,
    /// Insertion time; sole sort key for listing
    pub created_at: DateTime<Utc>,
}

/// An analyzed review that has not been persisted yet
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_name: String,
    pub review_text: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub key_points: String,
    /// Stamped by the service at analysis time; the store fills in the
    /// insertion time when None
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Positive).unwrap(),
            "\"positive\""
        );
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
        assert_eq!(Sentiment::Neutral.to_string(), "neutral");
    }

    #[test]
    fn review_json_shape() {
        let review = Review {
            id: 7,
            product_name: "Widget".to_string(),
            review_text: "Works exactly as described".to_string(),
            sentiment: Sentiment::Positive,
            sentiment_score: 0.98,
            key_points: "- solid build".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["sentiment"], "positive");
        assert_eq!(json["sentiment_score"], 0.98);
        // chrono serializes DateTime<Utc> as RFC 3339 / ISO-8601
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }
}

//! Sentiment normalization
//!
//! Maps heterogeneous classifier vocabularies onto a three-way polarity
//! plus confidence score, and shields callers from classifier failures.

use crate::services::{RawClassification, SentimentClassifier};
use reva_common::db::Sentiment;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sentiment and score reported when classification cannot run
pub const NEUTRAL_FALLBACK: (Sentiment, f64) = (Sentiment::Neutral, 0.5);

/// Character cap applied before submitting text to the classifier
///
/// Matches the input limit of the supported sentiment models; longer
/// reviews are classified by their opening.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 512;

/// Label vocabulary emitted by the configured classifier model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScheme {
    /// POSITIVE / NEGATIVE labels (SST-2 style models)
    Binary,
    /// "<k> stars" labels (multilingual product-review models)
    StarRating,
}

impl LabelScheme {
    /// Map a raw label/score pair onto (sentiment, confidence)
    pub fn normalize(&self, label: &str, score: f64) -> (Sentiment, f64) {
        let sentiment = match self {
            LabelScheme::Binary => match label {
                "POSITIVE" => Sentiment::Positive,
                "NEGATIVE" => Sentiment::Negative,
                _ => Sentiment::Neutral,
            },
            LabelScheme::StarRating => {
                // Unparsable labels count as 3 stars (neutral)
                let stars = leading_integer(label).unwrap_or(3);
                if stars >= 4 {
                    Sentiment::Positive
                } else if stars == 3 {
                    Sentiment::Neutral
                } else {
                    Sentiment::Negative
                }
            }
        };

        (sentiment, score)
    }
}

impl std::str::FromStr for LabelScheme {
    type Err = reva_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Ok(LabelScheme::Binary),
            "stars" | "star-rating" => Ok(LabelScheme::StarRating),
            other => Err(reva_common::Error::Config(format!(
                "Unknown label scheme '{}' (expected \"binary\" or \"stars\")",
                other
            ))),
        }
    }
}

/// Parse the integer prefix of a star label ("4 stars" -> 4)
fn leading_integer(label: &str) -> Option<u32> {
    let digits: String = label
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Sentiment analysis front-end over the external classifier
///
/// Never fails: blank input short-circuits without an external call, and
/// classifier errors degrade to neutral with 0.5 confidence.
pub struct SentimentAnalyzer {
    classifier: Arc<dyn SentimentClassifier>,
    scheme: LabelScheme,
    max_input_chars: usize,
}

impl SentimentAnalyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, scheme: LabelScheme) -> Self {
        Self {
            classifier,
            scheme,
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Override the input character cap
    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    /// Classify review text
    pub async fn analyze(&self, text: &str) -> (Sentiment, f64) {
        if text.trim().is_empty() {
            // Nothing to classify; skip the external call entirely
            return NEUTRAL_FALLBACK;
        }

        let input = truncate_chars(text, self.max_input_chars);

        match self.classifier.classify(input).await {
            Ok(RawClassification { label, score }) => {
                let (sentiment, score) = self.scheme.normalize(&label, score);
                debug!(label = %label, sentiment = %sentiment, score, "Classified review text");
                (sentiment, score)
            }
            Err(e) => {
                warn!(error = %e, "Sentiment classification failed, defaulting to neutral");
                NEUTRAL_FALLBACK
            }
        }
    }
}

/// Truncate to a maximum number of characters on a char boundary
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Key point extraction
//!
//! Builds the extraction prompt around the review text and shields callers
//! from generator failures with a fixed fallback string.

use crate::services::KeyPointGenerator;
use std::sync::Arc;
use tracing::warn;

/// Stored when the generator fails or produces no usable text
pub const KEY_POINTS_FALLBACK: &str = "Could not extract key points";

/// Key point extraction front-end over the external generator
///
/// One generator call per review, no retry. Never fails.
pub struct KeyPointExtractor {
    generator: Arc<dyn KeyPointGenerator>,
}

impl KeyPointExtractor {
    pub fn new(generator: Arc<dyn KeyPointGenerator>) -> Self {
        Self { generator }
    }

    /// Summarize a review into bullet points
    pub async fn extract(&self, review_text: &str) -> String {
        let prompt = build_prompt(review_text);

        match self.generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Generator returned blank key points, using fallback");
                KEY_POINTS_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Key point extraction failed, using fallback");
                KEY_POINTS_FALLBACK.to_string()
            }
        }
    }
}

/// Build the fixed extraction prompt with the review text embedded verbatim
fn build_prompt(review_text: &str) -> String {
    format!(
        "Analyze this product review and extract 3-5 key points in bullet format.\n\
         Be concise and focus on the most important aspects mentioned.\n\
         \n\
         Review: {}\n\
         \n\
         Key Points:",
        review_text
    )
}

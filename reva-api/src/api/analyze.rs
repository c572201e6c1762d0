//! Review analysis endpoint

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::services::analyzer::MISSING_FIELDS_MSG;
use crate::AppState;
use reva_common::api::ApiResponse;
use reva_common::db::Review;

/// Request body for POST /api/analyze-review
///
/// Fields are optional so an absent key maps to the documented 400 body
/// instead of a generic deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct AnalyzeReviewRequest {
    pub product_name: Option<String>,
    pub review_text: Option<String>,
}

/// POST /api/analyze-review
///
/// Validates the body, derives sentiment and key points, persists the
/// review, and returns the stored row with its assigned id.
pub async fn analyze_review(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeReviewRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Review>>)> {
    let (Some(product_name), Some(review_text)) = (request.product_name, request.review_text)
    else {
        return Err(ApiError::BadRequest(MISSING_FIELDS_MSG.to_string()));
    };

    let review = state.service.analyze(&product_name, &review_text).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(review))))
}

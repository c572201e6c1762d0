//! Review listing endpoint

use axum::{extract::State, Json};

use crate::error::ApiResult;
use crate::AppState;
use reva_common::api::ApiResponse;
use reva_common::db::Review;

/// GET /api/reviews
///
/// Returns every stored review, newest first. No pagination or filtering.
pub async fn list_reviews(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<Review>>>> {
    let reviews = state.store.list_all().await?;
    Ok(Json(ApiResponse::new(reviews)))
}

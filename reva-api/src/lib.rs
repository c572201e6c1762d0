//! reva-api - Product Review Analyzer HTTP service
//!
//! Accepts product reviews over HTTP/JSON, derives sentiment and key
//! points through external model services, and persists the results for
//! newest-first listing.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;

pub use error::{ApiError, ApiResult};

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::db::ReviewStore;
use crate::services::ReviewService;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Review persistence, used directly by the listing endpoint
    pub store: ReviewStore,
    /// Analysis orchestration for incoming reviews
    pub service: Arc<ReviewService>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: ReviewStore, service: Arc<ReviewService>) -> Self {
        Self { store, service }
    }
}

/// Build application router
///
/// The browser front-end is served from a different origin, so CORS stays
/// wide open for all three routes.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/api/analyze-review", post(api::analyze_review))
        .route("/api/reviews", get(api::list_reviews))
        .merge(api::health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

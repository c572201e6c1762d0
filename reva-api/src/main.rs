//! reva-api - Product Review Analyzer HTTP service
//!
//! Single-process service: three JSON endpoints over one SQLite table,
//! with sentiment classification and key-point extraction delegated to
//! external model services.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use reva_api::config::{AppConfig, Cli};
use reva_api::db::ReviewStore;
use reva_api::services::{
    GeminiGenerator, HuggingFaceClassifier, KeyPointExtractor, ReviewService, SentimentAnalyzer,
};
use reva_api::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Product Review Analyzer (reva-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let toml_config = reva_common::config::load_config(cli.config.as_deref())?;
    let config = AppConfig::resolve(&cli, &toml_config)?;

    info!("Database: {}", config.database_path.display());
    let pool = reva_common::db::init_database(&config.database_path).await?;

    let classifier = HuggingFaceClassifier::new(
        config.classifier.base_url.clone(),
        config.classifier.model.clone(),
        config.classifier.api_token.clone(),
        config.classifier.timeout,
    )?;
    info!(
        model = %config.classifier.model,
        scheme = ?config.classifier.scheme,
        "Sentiment classifier ready"
    );

    let generator = GeminiGenerator::new(
        config.generator.base_url.clone(),
        config.generator.model.clone(),
        config.generator.api_key.clone(),
        config.generator.timeout,
    )?;
    info!(model = %config.generator.model, "Key-point generator ready");

    let store = ReviewStore::new(pool);
    let sentiment = SentimentAnalyzer::new(Arc::new(classifier), config.classifier.scheme);
    let keypoints = KeyPointExtractor::new(Arc::new(generator));
    let service = Arc::new(ReviewService::new(sentiment, keypoints, store.clone()));

    let state = AppState::new(store, service);
    let app = reva_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("reva-api listening on http://{}", config.bind_address);
    info!("Health check: http://{}/api/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

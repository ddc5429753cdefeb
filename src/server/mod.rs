pub mod handlers;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::{config::VariationConfig, gemini::GeminiClient};

/// Per-request uploads can carry several multi-megabyte images.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub client: GeminiClient,
    pub variations: VariationConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/generate", post(handlers::generate))
        .route("/edit", post(handlers::edit))
        .route("/virtual_try_on", post(handlers::virtual_try_on))
        .route("/create_ads", post(handlers::create_ads))
        .route("/merge_images", post(handlers::merge_images))
        .route("/generate_scenes", post(handlers::generate_scenes))
        .route("/restore_old_image", post(handlers::restore_old_image))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

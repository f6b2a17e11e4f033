//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//!
//! Layers (outermost → innermost): CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::inference::PredictionService;

/// Build the API router around a shared prediction service.
pub fn api_router(service: Arc<PredictionService>) -> Router {
    build_router(ApiContext::new(service))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    Router::new()
        .route("/", get(endpoints::health::status))
        .route("/health", get(endpoints::health::check))
        .route("/predict", post(endpoints::predict::predict))
        .route("/symptoms", get(endpoints::catalog::symptoms))
        .route("/diseases", get(endpoints::catalog::diseases))
        .route("/diseases/search", post(endpoints::catalog::search))
        .route("/diseases/:name", get(endpoints::catalog::disease))
        .with_state(ctx)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}

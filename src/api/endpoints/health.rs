//! Health and status endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::inference::reference::{DiseaseCatalog, CANONICAL_SYMPTOMS};

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_status: &'static str,
    pub available_symptoms: usize,
    pub available_diseases: usize,
}

/// `GET /`: liveness plus whether a trained model is serving.
pub async fn status(State(ctx): State<ApiContext>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        model_loaded: ctx.service.model_loaded(),
        version: crate::config::APP_VERSION,
    })
}

/// `GET /health`: detailed status.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let model_status = if ctx.service.model_loaded() {
        "loaded"
    } else {
        "using fallback"
    };

    Json(HealthResponse {
        status: "healthy",
        model_status,
        available_symptoms: CANONICAL_SYMPTOMS.len(),
        available_diseases: DiseaseCatalog.len(),
    })
}

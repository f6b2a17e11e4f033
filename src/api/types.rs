//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::inference::PredictionService;

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware.
///
/// The service is immutable after startup, so handlers only need `&`.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<PredictionService>,
}

impl ApiContext {
    pub fn new(service: Arc<PredictionService>) -> Self {
        Self { service }
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response bodies
// ═══════════════════════════════════════════════════════════

/// `POST /predict` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomInput {
    pub symptoms: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SymptomListResponse {
    pub symptoms: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Deserialize, Default)]
pub struct SymptomQuery {
    /// Case-insensitive substring filter.
    pub search: Option<String>,
}

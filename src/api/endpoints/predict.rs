//! `POST /predict`: symptom-based disease prediction.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SymptomInput};
use crate::models::PredictionResult;

/// Predict the most likely disease for the submitted symptoms.
///
/// An empty list is the only client error; model faults are answered by
/// the rule engine inside the service.
pub async fn predict(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(input) = payload?;
    let result = ctx.service.predict(&input.symptoms)?;
    Ok(Json(result))
}

//! Read-only reference endpoints served from the static dataset.

use std::str::FromStr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SymptomInput, SymptomListResponse, SymptomQuery};
use crate::inference::normalize::normalize_symptom;
use crate::inference::reference::{disease_info, DiseaseCatalog, DiseaseInfo, CANONICAL_SYMPTOMS};
use crate::models::{round_confidence, Disease};

#[derive(Serialize)]
pub struct DiseaseListResponse {
    pub diseases: DiseaseCatalog,
    pub count: usize,
}

#[derive(Serialize)]
pub struct DiseaseDetailResponse {
    pub name: &'static str,
    #[serde(flatten)]
    pub info: DiseaseInfo,
    /// Rule-engine profile; empty for diseases only the model predicts.
    pub symptoms: &'static [&'static str],
}

#[derive(Serialize)]
pub struct DiseaseMatch {
    pub name: &'static str,
    #[serde(flatten)]
    pub info: DiseaseInfo,
    pub matching_symptoms: Vec<&'static str>,
    pub total_symptoms: &'static [&'static str],
    /// Percentage to one decimal, not capped.
    pub match_score: f64,
}

#[derive(Serialize)]
pub struct DiseaseSearchResponse {
    pub diseases: Vec<DiseaseMatch>,
    pub count: usize,
}

/// `GET /symptoms`: canonical vocabulary, optionally filtered by `search`.
///
/// The search term is normalized like a symptom, so "sore throat" finds
/// `sore_throat`.
pub async fn symptoms(Query(query): Query<SymptomQuery>) -> Json<SymptomListResponse> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_symptom);

    let symptoms: Vec<String> = CANONICAL_SYMPTOMS
        .iter()
        .filter(|s| needle.as_deref().map_or(true, |n| s.contains(n)))
        .map(|s| s.to_string())
        .collect();

    Json(SymptomListResponse {
        count: symptoms.len(),
        symptoms,
    })
}

/// `GET /diseases`: full disease catalog keyed by name.
pub async fn diseases() -> Json<DiseaseListResponse> {
    Json(DiseaseListResponse {
        diseases: DiseaseCatalog,
        count: DiseaseCatalog.len(),
    })
}

/// `GET /diseases/:name`: guidance for one disease (exact display name).
pub async fn disease(
    State(ctx): State<ApiContext>,
    Path(name): Path<String>,
) -> Result<Json<DiseaseDetailResponse>, ApiError> {
    let disease = Disease::from_str(&name)
        .map_err(|_| ApiError::NotFound(format!("Unknown disease: {name}")))?;

    let symptoms = ctx
        .service
        .rules()
        .profile(disease)
        .map(|p| p.symptoms)
        .unwrap_or_default();

    Ok(Json(DiseaseDetailResponse {
        name: disease.as_str(),
        info: disease_info(disease),
        symptoms,
    }))
}

/// `POST /diseases/search`: every disease sharing a symptom with the
/// input, best match first. Equal scores keep profile order.
pub async fn search(
    State(ctx): State<ApiContext>,
    payload: Result<Json<SymptomInput>, JsonRejection>,
) -> Result<Json<DiseaseSearchResponse>, ApiError> {
    let Json(input) = payload?;
    let diseases: Vec<DiseaseMatch> = ctx
        .service
        .search(&input.symptoms)?
        .into_iter()
        .map(|candidate| DiseaseMatch {
            name: candidate.disease.as_str(),
            info: disease_info(candidate.disease),
            matching_symptoms: candidate.matched,
            total_symptoms: candidate.profile,
            match_score: round_confidence(candidate.score),
        })
        .collect();

    Ok(Json(DiseaseSearchResponse {
        count: diseases.len(),
        diseases,
    }))
}

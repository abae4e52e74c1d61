use axum::{extract::State, http::HeaderMap, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{ApiKey, MovieId, MovieQuery, Recommendation, StorylineBasis},
};

use super::AppState;

/// Header carrying a per-request completion credential
pub const COMPLETION_KEY_HEADER: &str = "x-completion-key";

// Request/Response types

/// Both fields are optional on the wire so a missing one maps to
/// `MissingInput` rather than a deserialization rejection.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub movie: MovieSummary,
    pub basis: StorylineBasis,
    pub recommendations: String,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        let movie = recommendation.movie;
        Self {
            movie: MovieSummary {
                id: movie.id,
                title: movie.title,
                year: movie.year,
                rating: movie.rating,
                genres: movie.genres,
            },
            basis: recommendation.basis,
            recommendations: recommendation.recommendations,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Resolve a movie and ask the model for similar ones
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let credential = headers
        .get(COMPLETION_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(ApiKey::new)
        .or_else(|| state.credential.clone())
        .ok_or(AppError::MissingCredential)?;

    let (Some(title), Some(year)) = (request.title.as_deref(), request.year) else {
        return Err(AppError::MissingInput);
    };
    let query = MovieQuery::new(title, year)?;

    tracing::info!(
        request_id = %request_id,
        title = %query.title(),
        year = query.year(),
        "Processing recommendation request"
    );

    let recommendation = state
        .recommender
        .recommend(&query, &credential)
        .await
        .inspect_err(|e| {
            tracing::info!(request_id = %request_id, error = e.kind(), "Recommendation request failed")
        })?;

    tracing::info!(
        request_id = %request_id,
        movie_id = %recommendation.movie.id,
        basis = ?recommendation.basis,
        "Recommendation completed"
    );

    Ok(Json(recommendation.into()))
}

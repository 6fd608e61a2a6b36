use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Category, ImageRef, Place, Region, SearchQuery, SearchResult},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Default, Deserialize)]
pub struct SubmitParams {
    /// Block until the AI answer has been applied
    #[serde(default)]
    pub wait: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Merge order: curated first, then AI results
    Relevance,
    Rating,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultParams {
    pub sort: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    pub category: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaglineParams {
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub place_id: String,
    pub image_ref: ImageRef,
    pub generated: bool,
}

#[derive(Debug, Serialize)]
pub struct TaglineResponse {
    pub tagline: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Submit a new search
///
/// Responds 202 with the provisional snapshot, or 200 with the settled one
/// when `wait=true`.
pub async fn submit_search(
    State(state): State<AppState>,
    Query(params): Query<SubmitParams>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> AppResult<(StatusCode, Json<SearchResult>)> {
    let Json(query) = payload.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let handle = state.engine.submit(query).await;

    if params.wait {
        handle
            .await
            .map_err(|e| AppError::Internal(format!("Search task failed: {}", e)))?;
        return Ok((StatusCode::OK, Json(state.engine.current_result())));
    }

    Ok((StatusCode::ACCEPTED, Json(state.engine.current_result())))
}

/// Get the current search result
pub async fn get_search(
    State(state): State<AppState>,
    Query(params): Query<ResultParams>,
) -> Json<SearchResult> {
    let mut result = state.engine.current_result();
    if params.sort == Some(SortOrder::Rating) {
        result.results.sort_by(Place::by_rating_desc);
    }
    Json(result)
}

/// Get the place open in the detail view
pub async fn get_selection(State(state): State<AppState>) -> AppResult<Json<Place>> {
    state
        .engine
        .selected()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No place selected".to_string()))
}

/// Open the detail view for a place
pub async fn select_place(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Place>> {
    let place = state.engine.select_place(&id).await?;
    Ok(Json(place))
}

/// Close the detail view
pub async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    state.engine.clear_selection().await;
    StatusCode::NO_CONTENT
}

/// Image for a place, generated on demand when it has none
pub async fn place_image(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ImageResponse>> {
    let place = state
        .engine
        .find_place(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Place {} not found", id)))?;

    if let Some(image_ref) = place.image_ref {
        return Ok(Json(ImageResponse {
            place_id: place.id,
            image_ref,
            generated: false,
        }));
    }

    let image_ref = state
        .gateway
        .generate_image(&place.name, &place.description)
        .await;

    Ok(Json(ImageResponse {
        place_id: place.id,
        image_ref,
        generated: true,
    }))
}

/// Promotional tagline for the header
pub async fn tagline(
    State(state): State<AppState>,
    Query(params): Query<TaglineParams>,
) -> Json<TaglineResponse> {
    let subject = params.subject.unwrap_or_default();
    let tagline = state.gateway.generate_tagline(&subject).await;
    Json(TaglineResponse { tagline })
}

/// Browse the curated catalog without calling the AI guide
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> AppResult<Json<Vec<Place>>> {
    let category = match params.category.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) if raw.eq_ignore_ascii_case("all") => None,
        Some(raw) => Some(raw.parse::<Category>().map_err(AppError::InvalidInput)?),
    };

    let region = match params.region.as_deref().map(str::trim) {
        None | Some("") => Region::All,
        Some(raw) => raw.parse::<Region>().map_err(AppError::InvalidInput)?,
    };

    Ok(Json(state.engine.catalog().filter(category, region)))
}

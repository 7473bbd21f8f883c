use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    middleware::map_response,
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::types::trip::LiveLocationView;

const MAX_REQUEST_ID_LEN: usize = 128;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tracking/:request_id", get(live_location))
        .route("/api/tracking/:request_id/arrived", post(mark_arrived))
        .layer(map_response(no_store))
}

#[derive(Debug, Deserialize)]
struct TrackingQuery {
    technician: Option<String>,
}

async fn live_location(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<LiveLocationView>, AppError> {
    let request_id = validate_request_id(&request_id)?;
    let view = state
        .estimator()
        .get_live_location(request_id, query.technician.as_deref())?;
    Ok(Json(view))
}

async fn mark_arrived(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<LiveLocationView>, AppError> {
    let request_id = validate_request_id(&request_id)?;
    let view = state
        .estimator()
        .mark_arrived(request_id)?
        .ok_or_else(|| AppError::NotFound(request_id.to_string()))?;
    Ok(Json(view))
}

fn validate_request_id(request_id: &str) -> Result<&str, AppError> {
    let trimmed = request_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest("Request id is required".to_string()));
    }
    if trimmed.len() > MAX_REQUEST_ID_LEN {
        return Err(AppError::BadRequest(format!(
            "Request id must be at most {} characters",
            MAX_REQUEST_ID_LEN
        )));
    }
    Ok(trimmed)
}

// Every poll must see freshly simulated state, errors included.
async fn no_store(mut response: Response) -> Response {
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, internal_error, AppState};
use crate::api::models::SuccessResponse;
use crate::domain::{Match, MatchLocation};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchParams {
    pub match_id: Option<String>,
}

fn not_found_or_ok(
    result: anyhow::Result<bool>,
    missing: &str,
    context: &str,
) -> axum::response::Response {
    match result {
        Ok(true) => Json(SuccessResponse::ok()).into_response(),
        Ok(false) => error_response(StatusCode::NOT_FOUND, missing),
        Err(e) => internal_error(context, e),
    }
}

pub async fn add_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(new_match): Json<Match>,
) -> impl IntoResponse {
    let target = MatchLocation::from_wire_id(&id);
    let result = state.tracker.add_match(&target, new_match);
    not_found_or_ok(result, "Tournament not found", "Failed to add match")
}

/// Replaces the match whose id matches the body's id
pub async fn update_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(updated): Json<Match>,
) -> impl IntoResponse {
    let target = MatchLocation::from_wire_id(&id);
    let match_id = updated.id.clone();
    let result = state.tracker.update_match(&target, &match_id, updated);
    not_found_or_ok(result, "Match not found", "Failed to update match")
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<MatchParams>,
) -> impl IntoResponse {
    let Some(match_id) = params.match_id.filter(|m| !m.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "Match ID required");
    };

    let target = MatchLocation::from_wire_id(&id);
    let result = state.tracker.delete_match(&target, &match_id);
    not_found_or_ok(result, "Match not found", "Failed to delete match")
}

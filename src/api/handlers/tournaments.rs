use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, internal_error, AppState, GameTypeParams};
use crate::api::models::SuccessResponse;
use crate::domain::Tournament;
use crate::store;

pub async fn list_tournaments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameTypeParams>,
) -> impl IntoResponse {
    let game_type = match params.parse() {
        Ok(game_type) => game_type,
        Err(response) => return response,
    };

    match state.tracker.tournaments_for(game_type) {
        Ok(tournaments) => Json(tournaments).into_response(),
        Err(e) => internal_error("Failed to list tournaments", e),
    }
}

pub async fn save_tournament(
    State(state): State<Arc<AppState>>,
    Json(tournament): Json<Tournament>,
) -> impl IntoResponse {
    if let Err(e) = store::ensure_regular_id(&tournament.id) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    match state.tracker.save_tournament(&tournament) {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(e) => internal_error("Failed to save tournament", e),
    }
}

pub async fn get_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.tracker.tournament(&id) {
        Ok(Some(tournament)) => Json(tournament).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Tournament not found"),
        Err(e) => internal_error("Failed to fetch tournament", e),
    }
}

pub async fn delete_tournament(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.tracker.delete_tournament(&id) {
        Ok(()) => Json(SuccessResponse::ok()).into_response(),
        Err(e) => internal_error("Failed to delete tournament", e),
    }
}

pub async fn get_tournament_summary(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.tracker.summary(&id) {
        Ok(Some(summary)) => Json(summary).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Tournament not found"),
        Err(e) => internal_error("Failed to summarise tournament", e),
    }
}

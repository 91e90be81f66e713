use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{error_response, internal_error, AppState};
use crate::api::models::{
    DeckNamesResponse, OrganizeRequest, QuickAddResponse, SuccessResponse, TournamentListResponse,
};
use crate::domain::QuickAdd;

pub async fn get_inbox(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.inbox() {
        Ok(inbox) => Json(inbox.matches).into_response(),
        Err(e) => internal_error("Failed to fetch inbox", e),
    }
}

pub async fn get_decks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.deck_names() {
        Ok(names) => Json(names).into_response(),
        Err(e) => internal_error("Failed to fetch deck names", e),
    }
}

pub async fn quick_add_decks(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.deck_names() {
        Ok(deck_names) => Json(DeckNamesResponse { deck_names }).into_response(),
        Err(e) => internal_error("Failed to get decks", e),
    }
}

pub async fn quick_add(
    State(state): State<Arc<AppState>>,
    Json(entry): Json<QuickAdd>,
) -> impl IntoResponse {
    // validate the score before touching the store
    if let Err(e) = crate::domain::quick_add::parse_result(&entry.result) {
        return error_response(StatusCode::BAD_REQUEST, e.to_string());
    }

    match state.tracker.quick_add(entry) {
        Ok(match_id) => Json(QuickAddResponse {
            success: true,
            match_id,
        })
        .into_response(),
        Err(e) => internal_error("Failed to add match", e),
    }
}

pub async fn organize_targets(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.tracker.real_tournaments() {
        Ok(tournaments) => Json(TournamentListResponse { tournaments }).into_response(),
        Err(e) => internal_error("Failed to get tournaments", e),
    }
}

pub async fn organize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<OrganizeRequest>,
) -> impl IntoResponse {
    if request.match_id.is_empty() || request.target_tournament_id.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing matchId or targetTournamentId");
    }

    match state.tracker.organize(&request.match_id, &request.target_tournament_id) {
        Ok(true) => Json(SuccessResponse::ok()).into_response(),
        Ok(false) => error_response(StatusCode::BAD_REQUEST, "Failed to move match"),
        Err(e) => internal_error("Failed to move match", e),
    }
}

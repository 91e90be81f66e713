use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use super::{internal_error, AppState, GameTypeParams};

/// Aggregates over real tournaments only; the inbox never reaches the stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GameTypeParams>,
) -> impl IntoResponse {
    let game_type = match params.parse() {
        Ok(game_type) => game_type,
        Err(response) => return response,
    };

    match state.tracker.stats(game_type) {
        Ok(report) => Json(report).into_response(),
        Err(e) => internal_error("Failed to compute statistics", e),
    }
}

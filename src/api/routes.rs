use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers::{
    inbox::{get_decks, get_inbox, organize, organize_targets, quick_add, quick_add_decks},
    matches::{add_match, delete_match, update_match},
    stats::get_stats,
    tournaments::{
        delete_tournament, get_tournament, get_tournament_summary, list_tournaments,
        save_tournament,
    },
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tournaments", get(list_tournaments).post(save_tournament))
        .route("/api/tournaments/:id", get(get_tournament).delete(delete_tournament))
        .route(
            "/api/tournaments/:id/matches",
            post(add_match).put(update_match).delete(delete_match),
        )
        .route("/api/tournaments/:id/summary", get(get_tournament_summary))
        .route("/api/inbox", get(get_inbox))
        .route("/api/decks", get(get_decks))
        .route("/api/quick-add", get(quick_add_decks).post(quick_add))
        .route("/api/organize", get(organize_targets).post(organize))
        .route("/api/stats", get(get_stats))
        .with_state(state)
}

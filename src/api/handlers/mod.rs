use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;

use crate::api::models::ErrorResponse;
use crate::domain::GameType;
use crate::services::TrackerService;

pub mod inbox;
pub mod matches;
pub mod stats;
pub mod tournaments;

pub struct AppState {
    pub tracker: TrackerService,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTypeParams {
    pub game_type: Option<String>,
}

impl GameTypeParams {
    /// `None` means no filter; an unknown value is a client error
    pub fn parse(&self) -> Result<Option<GameType>, Response> {
        match self.game_type.as_deref() {
            None | Some("") | Some("all") => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|e: anyhow::Error| error_response(StatusCode::BAD_REQUEST, e.to_string())),
        }
    }
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn internal_error(context: &str, e: anyhow::Error) -> Response {
    log::error!("{}: {:?}", context, e);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{}: {}", context, e))
}

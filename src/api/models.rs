use serde::{Deserialize, Serialize};

use crate::domain::Tournament;

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAddResponse {
    pub success: bool,
    pub match_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckNamesResponse {
    pub deck_names: Vec<String>,
}

#[derive(Serialize)]
pub struct TournamentListResponse {
    pub tournaments: Vec<Tournament>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizeRequest {
    #[serde(default)]
    pub match_id: String,
    #[serde(default)]
    pub target_tournament_id: String,
}

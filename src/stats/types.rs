use serde::Serialize;

pub type WinRate = f64;
pub type RoundedWinRate = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub wins: usize,
    pub losses: usize,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentSummary {
    pub id: String,
    pub date: String,
    pub location: String,
    pub match_wins: usize,
    pub match_losses: usize,
    pub game_wins: usize,
    pub game_losses: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_match_wins: usize,
    pub total_match_losses: usize,
    pub total_game_wins: usize,
    pub total_game_losses: usize,
    pub match_win_rate: RoundedWinRate,
}

/// Record piloting one deck
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStats {
    pub deck_name: String,
    pub match_wins: usize,
    pub match_losses: usize,
    pub win_rate: WinRate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayDrawStats {
    pub on_play_wins: usize,
    pub on_play_total: usize,
    pub on_draw_wins: usize,
    pub on_draw_total: usize,
    pub on_play_win_rate: WinRate,
    pub on_draw_win_rate: WinRate,
}

/// Record facing one opponent deck
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupStats {
    pub opponent_deck: String,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: WinRate,
}

impl MatchupStats {
    pub fn total(&self) -> usize {
        self.wins + self.losses
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: String,
    pub win_rate: RoundedWinRate,
}

/// Everything the statistics view shows, computed over one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    pub overall: OverallStats,
    pub decks: Vec<DeckStats>,
    pub play_draw: PlayDrawStats,
    pub matchups: Vec<MatchupStats>,
    pub trend: Vec<TrendPoint>,
}

pub mod breakdowns;
pub mod rates;
pub mod records;
pub mod trend;
pub mod types;

pub use breakdowns::{deck_stats, matchup_stats, play_draw_stats};
pub use records::{match_result, overall_stats, tournament_summary};
pub use trend::win_rate_trend;
pub use types::{
    DeckStats, MatchResult, MatchupStats, OverallStats, PlayDrawStats, StatsReport,
    TournamentSummary, TrendPoint, WinRate,
};

use crate::domain::Tournament;

/// Runs every aggregation over the same collection
pub fn report(tournaments: &[Tournament]) -> StatsReport {
    StatsReport {
        overall: overall_stats(tournaments),
        decks: deck_stats(tournaments),
        play_draw: play_draw_stats(tournaments),
        matchups: matchup_stats(tournaments),
        trend: win_rate_trend(tournaments),
    }
}

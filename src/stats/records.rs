use crate::domain::{Match, Tournament};

use super::rates::rounded_win_rate;
use super::types::{MatchResult, OverallStats, TournamentSummary};

pub fn match_result(m: &Match) -> MatchResult {
    let wins = m.games.iter().filter(|g| g.won).count();
    let losses = m.games.len() - wins;

    MatchResult {
        wins,
        losses,
        won: wins > losses,
    }
}

pub fn tournament_summary(tournament: &Tournament) -> TournamentSummary {
    let mut summary = TournamentSummary {
        id: tournament.id.clone(),
        date: tournament.date.clone(),
        location: tournament.location.clone(),
        match_wins: 0,
        match_losses: 0,
        game_wins: 0,
        game_losses: 0,
    };

    for m in &tournament.matches {
        let result = match_result(m);
        if result.won {
            summary.match_wins += 1;
        } else {
            summary.match_losses += 1;
        }
        summary.game_wins += result.wins;
        summary.game_losses += result.losses;
    }

    summary
}

pub fn overall_stats(tournaments: &[Tournament]) -> OverallStats {
    let mut stats = OverallStats::default();

    for summary in tournaments.iter().map(tournament_summary) {
        stats.total_match_wins += summary.match_wins;
        stats.total_match_losses += summary.match_losses;
        stats.total_game_wins += summary.game_wins;
        stats.total_game_losses += summary.game_losses;
    }

    stats.match_win_rate = rounded_win_rate(
        stats.total_match_wins,
        stats.total_match_wins + stats.total_match_losses,
    );
    stats
}

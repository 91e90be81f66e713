use std::collections::HashMap;

use crate::domain::{Match, Tournament};

use super::rates::win_rate;
use super::records::match_result;
use super::types::{DeckStats, MatchupStats, PlayDrawStats};

/// Win/loss tallies keyed by name, remembering first-encounter order
#[derive(Default)]
struct Tally {
    index: HashMap<String, usize>,
    entries: Vec<(String, usize, usize)>,
}

impl Tally {
    fn record(&mut self, key: &str, won: bool) {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.entries.push((key.to_string(), 0, 0));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[slot];
        if won {
            entry.1 += 1;
        } else {
            entry.2 += 1;
        }
    }

    fn into_entries(self) -> Vec<(String, usize, usize)> {
        self.entries
    }
}

fn all_matches(tournaments: &[Tournament]) -> impl Iterator<Item = &Match> {
    tournaments.iter().flat_map(|t| t.matches.iter())
}

/// Per `my_deck` record, best win rate first
pub fn deck_stats(tournaments: &[Tournament]) -> Vec<DeckStats> {
    let mut tally = Tally::default();
    for m in all_matches(tournaments) {
        tally.record(&m.my_deck, match_result(m).won);
    }

    let mut decks: Vec<DeckStats> = tally
        .into_entries()
        .into_iter()
        .map(|(deck_name, wins, losses)| DeckStats {
            deck_name,
            match_wins: wins,
            match_losses: losses,
            win_rate: win_rate(wins, wins + losses),
        })
        .collect();

    // stable: equal rates keep first-encounter order
    decks.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate));
    decks
}

pub fn play_draw_stats(tournaments: &[Tournament]) -> PlayDrawStats {
    let mut stats = PlayDrawStats::default();

    for game in all_matches(tournaments).flat_map(|m| m.games.iter()) {
        if game.on_play {
            stats.on_play_total += 1;
            stats.on_play_wins += usize::from(game.won);
        } else {
            stats.on_draw_total += 1;
            stats.on_draw_wins += usize::from(game.won);
        }
    }

    stats.on_play_win_rate = win_rate(stats.on_play_wins, stats.on_play_total);
    stats.on_draw_win_rate = win_rate(stats.on_draw_wins, stats.on_draw_total);
    stats
}

/// Per opponent deck record, most played first. Matches with no recorded
/// opponent deck are left out.
pub fn matchup_stats(tournaments: &[Tournament]) -> Vec<MatchupStats> {
    let mut tally = Tally::default();
    for m in all_matches(tournaments).filter(|m| !m.opponent_deck.is_empty()) {
        tally.record(&m.opponent_deck, match_result(m).won);
    }

    let mut matchups: Vec<MatchupStats> = tally
        .into_entries()
        .into_iter()
        .map(|(opponent_deck, wins, losses)| MatchupStats {
            opponent_deck,
            wins,
            losses,
            win_rate: win_rate(wins, wins + losses),
        })
        .collect();

    matchups.sort_by(|a, b| b.total().cmp(&a.total()));
    matchups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Game;
    use crate::stats::test_support::{games, match_of, tournament};

    const WIN: &[bool] = &[true, true];
    const LOSS: &[bool] = &[false, false];

    #[test]
    fn test_deck_stats_groups_by_my_deck_only() {
        let tournaments = vec![tournament(
            "t1",
            "2024-01-01",
            vec![
                match_of("Burn", "Zoo", games(WIN)),
                match_of("Burn", "Zoo", games(LOSS)),
                match_of("Tron", "Burn", games(WIN)),
            ],
        )];

        let decks = deck_stats(&tournaments);

        assert_eq!(decks.len(), 2);
        assert_eq!(decks[0].deck_name, "Tron");
        assert_eq!(decks[0].win_rate, 100.0);
        assert_eq!(decks[1].deck_name, "Burn");
        assert_eq!(decks[1].match_wins, 1);
        assert_eq!(decks[1].match_losses, 1);
        assert_eq!(decks[1].win_rate, 50.0);
        assert!(decks.iter().all(|d| d.deck_name != "Zoo"));

        let total: usize = decks.iter().map(|d| d.match_wins + d.match_losses).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_deck_stats_no_normalisation() {
        let tournaments = vec![tournament(
            "t1",
            "2024-01-01",
            vec![
                match_of("Burn", "", games(WIN)),
                match_of("burn ", "", games(WIN)),
            ],
        )];

        assert_eq!(deck_stats(&tournaments).len(), 2);
    }

    #[test]
    fn test_deck_stats_ties_keep_first_encounter_order() {
        let tournaments = vec![
            tournament("a", "2024-01-01", vec![match_of("Zoo", "", games(WIN))]),
            tournament("b", "2024-01-02", vec![match_of("Affinity", "", games(WIN))]),
            tournament("c", "2024-01-03", vec![match_of("Merfolk", "", games(LOSS))]),
        ];

        let names: Vec<String> = deck_stats(&tournaments)
            .into_iter()
            .map(|d| d.deck_name)
            .collect();

        assert_eq!(names, vec!["Zoo", "Affinity", "Merfolk"]);
    }

    #[test]
    fn test_play_draw_stats() {
        let play_won = Game { on_play: true, won: true };
        let play_lost = Game { on_play: true, won: false };
        let draw_lost = Game { on_play: false, won: false };
        let tournaments = vec![tournament(
            "t1",
            "2024-01-01",
            vec![
                match_of("Burn", "", vec![play_won, draw_lost, play_won]),
                match_of("Burn", "", vec![play_won, draw_lost, play_lost]),
            ],
        )];

        let stats = play_draw_stats(&tournaments);

        assert_eq!(
            stats,
            PlayDrawStats {
                on_play_wins: 3,
                on_play_total: 4,
                on_draw_wins: 0,
                on_draw_total: 2,
                on_play_win_rate: 75.0,
                on_draw_win_rate: 0.0,
            }
        );
    }

    #[test]
    fn test_play_draw_stats_empty() {
        let stats = play_draw_stats(&[]);
        assert_eq!(stats.on_play_win_rate, 0.0);
        assert_eq!(stats.on_draw_win_rate, 0.0);
    }

    #[test]
    fn test_matchup_stats_skips_unknown_opponent_deck() {
        let tournaments = vec![tournament(
            "t1",
            "2024-01-01",
            vec![
                match_of("Burn", "Control", games(WIN)),
                match_of("Burn", "Control", games(WIN)),
                match_of("Burn", "Control", games(LOSS)),
                match_of("Burn", "", games(WIN)),
            ],
        )];

        let matchups = matchup_stats(&tournaments);

        assert_eq!(matchups.len(), 1);
        assert_eq!(matchups[0].opponent_deck, "Control");
        assert_eq!(matchups[0].wins, 2);
        assert_eq!(matchups[0].losses, 1);
        assert!((matchups[0].win_rate - 66.67).abs() < 0.01);
    }

    #[test]
    fn test_matchup_stats_sorted_by_games_played() {
        let tournaments = vec![tournament(
            "t1",
            "2024-01-01",
            vec![
                match_of("Burn", "Zoo", games(WIN)),
                match_of("Burn", "Tron", games(LOSS)),
                match_of("Burn", "Tron", games(LOSS)),
                match_of("Burn", "Affinity", games(WIN)),
            ],
        )];

        let order: Vec<String> = matchup_stats(&tournaments)
            .into_iter()
            .map(|m| m.opponent_deck)
            .collect();

        // Tron has the most games despite no wins; Zoo and Affinity tie
        assert_eq!(order, vec!["Tron", "Zoo", "Affinity"]);
    }
}

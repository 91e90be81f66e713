use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Game, Match};

/// A match entered from a final score like `"2-1"` instead of game by game
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickAdd {
    pub my_deck: String,
    #[serde(default)]
    pub opponent_deck: String,
    /// Play/draw of the first game; later games alternate
    pub on_play: bool,
    pub result: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuickAdd {
    /// Expands the score into games and builds a match with a fresh id
    pub fn into_match(self) -> Result<Match> {
        let (my_wins, opponent_wins) = parse_result(&self.result)?;
        let games = expand_games(my_wins, opponent_wins, self.on_play);

        Ok(Match {
            id: Uuid::new_v4().to_string(),
            opponent_name: String::new(),
            my_deck: self.my_deck,
            opponent_deck: self.opponent_deck,
            games,
            notes: Some(self.notes.unwrap_or_default()),
        })
    }
}

/// Most games a single quick-add result may expand into
pub const MAX_GAMES: u32 = 99;

/// Parses `"W-L"` into my wins and opponent wins
pub fn parse_result(result: &str) -> Result<(u32, u32)> {
    let (mine, theirs) = result
        .trim()
        .split_once('-')
        .with_context(|| format!("Result must look like W-L, got: {}", result))?;

    let my_wins = parse_count(mine, result)?;
    let opponent_wins = parse_count(theirs, result)?;

    let total = my_wins
        .checked_add(opponent_wins)
        .filter(|&total| total <= MAX_GAMES)
        .with_context(|| format!("Result must have at most {} games: {}", MAX_GAMES, result))?;
    if total == 0 {
        anyhow::bail!("Result must contain at least one game: {}", result);
    }

    Ok((my_wins, opponent_wins))
}

fn parse_count(part: &str, result: &str) -> Result<u32> {
    part.trim()
        .parse()
        .with_context(|| format!("Invalid game count in result: {}", result))
}

/// Orders wins and losses so my wins land on even games until the opponent
/// has taken all of theirs. Play/draw alternates from game one.
pub fn expand_games(my_wins: u32, opponent_wins: u32, first_on_play: bool) -> Vec<Game> {
    let total = my_wins.saturating_add(opponent_wins);
    let mut my_count = 0;
    let mut opponent_count = 0;
    let mut games = Vec::with_capacity(total as usize);

    for i in 0..total {
        let even = i % 2 == 0;
        let won = my_count < my_wins && (even || opponent_count == opponent_wins);
        if won {
            my_count += 1;
        } else {
            opponent_count += 1;
        }

        games.push(Game {
            on_play: if even { first_on_play } else { !first_on_play },
            won,
        });
    }

    games
}

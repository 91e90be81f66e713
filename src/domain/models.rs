use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reserved tournament id older data files use for the inbox entry
pub const LEGACY_INBOX_ID: &str = "__inbox__";

/// Card game a tournament was played in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[default]
    Magic,
    Riftbound,
}

impl GameType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::Magic => "Magic",
            GameType::Riftbound => "Riftbound",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "magic" => Ok(GameType::Magic),
            "riftbound" => Ok(GameType::Riftbound),
            other => anyhow::bail!("Unknown game type: {}", other),
        }
    }
}

/// One game within a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// True if this side took the first turn
    pub on_play: bool,
    pub won: bool,
}

/// One opponent pairing. The outcome is always derived from `games`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    #[serde(default)]
    pub opponent_name: String,
    #[serde(default)]
    pub my_deck: String,
    #[serde(default)]
    pub opponent_deck: String,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub game_type: GameType,
    #[serde(default)]
    pub matches: Vec<Match>,
}

impl Tournament {
    pub fn find_match(&self, match_id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }
}

/// Holding area for matches not yet assigned to a tournament
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inbox {
    #[serde(default)]
    pub matches: Vec<Match>,
}

/// Container a match lives in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchLocation {
    Inbox,
    Tournament(String),
}

impl MatchLocation {
    /// Maps a wire id to a location, honouring the legacy inbox id
    pub fn from_wire_id(id: &str) -> Self {
        if id == LEGACY_INBOX_ID {
            MatchLocation::Inbox
        } else {
            MatchLocation::Tournament(id.to_string())
        }
    }
}

impl fmt::Display for MatchLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchLocation::Inbox => f.write_str("inbox"),
            MatchLocation::Tournament(id) => write!(f, "tournament {}", id),
        }
    }
}

/// Removes the first match with `match_id`, keeping the order of the rest
pub fn take_match(matches: &mut Vec<Match>, match_id: &str) -> Option<Match> {
    let index = matches.iter().position(|m| m.id == match_id)?;
    Some(matches.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let json = r#"{"id":"t1","date":"2024-01-01","matches":[{"id":"m1","myDeck":"Burn"}]}"#;
        let tournament: Tournament = serde_json::from_str(json).unwrap();

        assert_eq!(tournament.game_type, GameType::Magic);
        assert_eq!(tournament.location, "");
        assert!(tournament.matches[0].games.is_empty());
        assert_eq!(tournament.matches[0].opponent_deck, "");
        assert_eq!(tournament.matches[0].notes, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let game = Game { on_play: true, won: false };
        let value = serde_json::to_value(game).unwrap();
        assert_eq!(value["onPlay"], true);

        let tournament = Tournament {
            id: "t1".to_string(),
            date: "2024-01-01".to_string(),
            location: "Local".to_string(),
            format: "Modern".to_string(),
            game_type: GameType::Riftbound,
            matches: vec![],
        };
        let value = serde_json::to_value(&tournament).unwrap();
        assert_eq!(value["gameType"], "Riftbound");
    }

    #[test]
    fn test_game_type_from_str() {
        assert_eq!("magic".parse::<GameType>().unwrap(), GameType::Magic);
        assert_eq!("Riftbound".parse::<GameType>().unwrap(), GameType::Riftbound);
        assert!("pokemon".parse::<GameType>().is_err());
    }

    #[test]
    fn test_take_match_preserves_order() {
        let make = |id: &str| Match {
            id: id.to_string(),
            opponent_name: String::new(),
            my_deck: String::new(),
            opponent_deck: String::new(),
            games: vec![],
            notes: None,
        };
        let mut matches = vec![make("a"), make("b"), make("c")];

        let taken = take_match(&mut matches, "b").unwrap();

        assert_eq!(taken.id, "b");
        assert_eq!(matches.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);
        assert!(take_match(&mut matches, "zzz").is_none());
    }

    #[test]
    fn test_location_from_wire_id() {
        assert_eq!(MatchLocation::from_wire_id("__inbox__"), MatchLocation::Inbox);
        assert_eq!(
            MatchLocation::from_wire_id("t1"),
            MatchLocation::Tournament("t1".to_string())
        );
    }
}

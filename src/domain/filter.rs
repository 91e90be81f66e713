use super::models::{GameType, Tournament};

/// Keeps only tournaments of the given game type
pub fn by_game_type(tournaments: &[Tournament], game_type: GameType) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|t| t.game_type == game_type)
        .cloned()
        .collect()
}

/// Applies an optional game type filter
pub fn by_optional_game_type(
    tournaments: Vec<Tournament>,
    game_type: Option<GameType>,
) -> Vec<Tournament> {
    match game_type {
        Some(game_type) => by_game_type(&tournaments, game_type),
        None => tournaments,
    }
}

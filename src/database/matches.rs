//! Match and game rows. A `None` tournament id addresses the inbox.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{Game, Match};

struct MatchRow {
    row_id: i64,
    id: String,
    opponent_name: String,
    my_deck: String,
    opponent_deck: String,
    notes: Option<String>,
}

fn parse_match_row(row: &rusqlite::Row) -> rusqlite::Result<MatchRow> {
    Ok(MatchRow {
        row_id: row.get(0)?,
        id: row.get(1)?,
        opponent_name: row.get(2)?,
        my_deck: row.get(3)?,
        opponent_deck: row.get(4)?,
        notes: row.get(5)?,
    })
}

fn parse_game_row(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        on_play: row.get(0)?,
        won: row.get(1)?,
    })
}

pub fn list_for_container(conn: &Connection, tournament_id: Option<&str>) -> Result<Vec<Match>> {
    let sql = "SELECT row_id, match_id, opponent_name, my_deck, opponent_deck, notes FROM matches WHERE tournament_id IS ?1 ORDER BY position, row_id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![tournament_id], parse_match_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list matches")?;

    rows.into_iter()
        .map(|row| {
            let games = list_games(conn, row.row_id)?;
            Ok(Match {
                id: row.id,
                opponent_name: row.opponent_name,
                my_deck: row.my_deck,
                opponent_deck: row.opponent_deck,
                games,
                notes: row.notes,
            })
        })
        .collect()
}

fn list_games(conn: &Connection, match_row_id: i64) -> Result<Vec<Game>> {
    let sql = "SELECT on_play, won FROM games WHERE match_row_id = ?1 ORDER BY position";

    let mut stmt = conn.prepare(sql)?;
    let games = stmt
        .query_map(params![match_row_id], parse_game_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to list games")?;

    Ok(games)
}

/// Drops every match in the container along with its games
pub fn delete_container(conn: &Connection, tournament_id: Option<&str>) -> Result<()> {
    conn.execute(
        "DELETE FROM games WHERE match_row_id IN (SELECT row_id FROM matches WHERE tournament_id IS ?1)",
        params![tournament_id],
    )
    .context("Failed to delete games")?;
    conn.execute(
        "DELETE FROM matches WHERE tournament_id IS ?1",
        params![tournament_id],
    )
    .context("Failed to delete matches")?;
    Ok(())
}

pub fn insert_matches(
    conn: &Connection,
    tournament_id: Option<&str>,
    matches: &[Match],
) -> Result<()> {
    for (position, m) in matches.iter().enumerate() {
        insert_match(conn, tournament_id, position as i64, m)?;
    }
    Ok(())
}

fn insert_match(
    conn: &Connection,
    tournament_id: Option<&str>,
    position: i64,
    m: &Match,
) -> Result<()> {
    let sql = "INSERT INTO matches (match_id, tournament_id, position, opponent_name, my_deck, opponent_deck, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING row_id";

    let row_id: i64 = conn
        .query_row(
            sql,
            params![
                m.id,
                tournament_id,
                position,
                m.opponent_name,
                m.my_deck,
                m.opponent_deck,
                m.notes
            ],
            |row| row.get(0),
        )
        .with_context(|| format!("Failed to insert match {}", m.id))?;

    for (game_position, game) in m.games.iter().enumerate() {
        conn.execute(
            "INSERT INTO games (match_row_id, position, on_play, won) VALUES (?1, ?2, ?3, ?4)",
            params![row_id, game_position as i64, game.on_play, game.won],
        )
        .context("Failed to insert game")?;
    }

    Ok(())
}

/// Row of the first match with this id in the container
pub fn find_row_id(
    conn: &Connection,
    match_id: &str,
    tournament_id: Option<&str>,
) -> Result<Option<i64>> {
    let sql = "SELECT row_id FROM matches WHERE match_id = ?1 AND tournament_id IS ?2 ORDER BY position, row_id LIMIT 1";

    conn.query_row(sql, params![match_id, tournament_id], |row| row.get(0))
        .optional()
        .context("Failed to look up match")
}

/// Moves a match row to the end of another container
pub fn append_to_container(
    conn: &Connection,
    row_id: i64,
    tournament_id: Option<&str>,
) -> Result<()> {
    let next_position: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM matches WHERE tournament_id IS ?1",
            params![tournament_id],
            |row| row.get(0),
        )
        .context("Failed to compute next match position")?;

    conn.execute(
        "UPDATE matches SET tournament_id = ?1, position = ?2 WHERE row_id = ?3",
        params![tournament_id, next_position, row_id],
    )
    .context("Failed to move match")
    .map(|_| ())
}

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{GameType, Tournament};

/// Tournament columns without matches
#[derive(Debug, Clone)]
pub struct TournamentRow {
    pub id: String,
    pub date: String,
    pub location: String,
    pub format: String,
    pub game_type: GameType,
}

impl TournamentRow {
    pub fn into_tournament(self, matches: Vec<crate::domain::Match>) -> Tournament {
        Tournament {
            id: self.id,
            date: self.date,
            location: self.location,
            format: self.format,
            game_type: self.game_type,
            matches,
        }
    }
}

/// Inserts the row or updates it in place, keeping its original rowid
pub fn upsert_tournament(conn: &Connection, tournament: &Tournament) -> Result<()> {
    let sql = "INSERT INTO tournaments (id, date, location, format, game_type) VALUES (?1, ?2, ?3, ?4, ?5)
               ON CONFLICT(id) DO UPDATE SET date = excluded.date, location = excluded.location, format = excluded.format, game_type = excluded.game_type";

    conn.execute(
        sql,
        params![
            tournament.id,
            tournament.date,
            tournament.location,
            tournament.format,
            tournament.game_type.as_str()
        ],
    )
    .with_context(|| format!("Failed to upsert tournament {}", tournament.id))
    .map(|_| ())
}

fn parse_tournament_row(row: &rusqlite::Row) -> rusqlite::Result<TournamentRow> {
    let game_type: String = row.get(4)?;
    Ok(TournamentRow {
        id: row.get(0)?,
        date: row.get(1)?,
        location: row.get(2)?,
        format: row.get(3)?,
        game_type: game_type.parse().unwrap_or_default(),
    })
}

pub fn find_by_id(conn: &Connection, id: &str) -> Result<Option<TournamentRow>> {
    let sql = "SELECT id, date, location, format, game_type FROM tournaments WHERE id = ?1";

    conn.query_row(sql, params![id], parse_tournament_row)
        .optional()
        .context("Failed to query tournament by id")
}

pub fn exists(conn: &Connection, id: &str) -> Result<bool> {
    let sql = "SELECT COUNT(*) FROM tournaments WHERE id = ?1";
    let count: i64 = conn
        .query_row(sql, params![id], |row| row.get(0))
        .context("Failed to check tournament existence")?;
    Ok(count > 0)
}

/// All tournaments in insertion order
pub fn list_all(conn: &Connection) -> Result<Vec<TournamentRow>> {
    let sql = "SELECT id, date, location, format, game_type FROM tournaments ORDER BY rowid";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_tournament_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete_by_id(conn: &Connection, id: &str) -> Result<()> {
    conn.execute("DELETE FROM tournaments WHERE id = ?1", params![id])
        .with_context(|| format!("Failed to delete tournament {}", id))
        .map(|_| ())
}

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, TransactionBehavior};

use crate::database::{self, matches, tournaments, DbPool};
use crate::domain::{Inbox, Match, MatchLocation, Tournament};

use super::{ensure_regular_id, TournamentStore};

/// Relational store; every mutation runs in a single transaction
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        let pool = database::create_pool(path)?;
        let conn = database::get_connection(&pool)?;
        database::setup::ensure_schema(&conn)?;
        Ok(Self { pool })
    }

    fn container_id(location: &MatchLocation) -> Option<&str> {
        match location {
            MatchLocation::Inbox => None,
            MatchLocation::Tournament(id) => Some(id.as_str()),
        }
    }

    fn container_exists(conn: &Connection, location: &MatchLocation) -> Result<bool> {
        match location {
            MatchLocation::Inbox => Ok(true),
            MatchLocation::Tournament(id) => tournaments::exists(conn, id),
        }
    }

    fn load_tournament(conn: &Connection, row: tournaments::TournamentRow) -> Result<Tournament> {
        let entries = matches::list_for_container(conn, Some(row.id.as_str()))?;
        Ok(row.into_tournament(entries))
    }

    /// Takes the write lock up front so read-modify-write work cannot
    /// interleave with another writer
    fn with_transaction<F, T>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = database::get_connection(&self.pool)?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .context("Failed to begin transaction")?;
        let result = work(&*tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(result)
    }
}

impl TournamentStore for SqliteStore {
    fn list(&self) -> Result<Vec<Tournament>> {
        let conn = database::get_connection(&self.pool)?;
        tournaments::list_all(&conn)?
            .into_iter()
            .map(|row| Self::load_tournament(&conn, row))
            .collect()
    }

    fn get_by_id(&self, id: &str) -> Result<Option<Tournament>> {
        let conn = database::get_connection(&self.pool)?;
        match tournaments::find_by_id(&conn, id)? {
            Some(row) => Ok(Some(Self::load_tournament(&conn, row)?)),
            None => Ok(None),
        }
    }

    fn save(&self, tournament: &Tournament) -> Result<()> {
        ensure_regular_id(&tournament.id)?;

        self.with_transaction(|tx| {
            tournaments::upsert_tournament(tx, tournament)?;
            matches::delete_container(tx, Some(tournament.id.as_str()))?;
            matches::insert_matches(tx, Some(tournament.id.as_str()), &tournament.matches)
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.with_transaction(|tx| {
            matches::delete_container(tx, Some(id))?;
            tournaments::delete_by_id(tx, id)
        })
    }

    fn inbox(&self) -> Result<Inbox> {
        let conn = database::get_connection(&self.pool)?;
        Ok(Inbox {
            matches: matches::list_for_container(&conn, None)?,
        })
    }

    fn save_inbox(&self, inbox: &Inbox) -> Result<()> {
        self.with_transaction(|tx| {
            matches::delete_container(tx, None)?;
            matches::insert_matches(tx, None, &inbox.matches)
        })
    }

    fn edit_matches(
        &self,
        location: &MatchLocation,
        edit: &mut dyn FnMut(&mut Vec<Match>) -> bool,
    ) -> Result<bool> {
        self.with_transaction(|tx| {
            if !Self::container_exists(tx, location)? {
                return Ok(false);
            }
            let container = Self::container_id(location);
            let mut entries = matches::list_for_container(tx, container)?;
            if !edit(&mut entries) {
                return Ok(false);
            }
            matches::delete_container(tx, container)?;
            matches::insert_matches(tx, container, &entries)?;
            Ok(true)
        })
    }

    fn move_match(&self, match_id: &str, from: &MatchLocation, to: &MatchLocation) -> Result<bool> {
        if from == to {
            return Ok(false);
        }

        self.with_transaction(|tx| {
            if !Self::container_exists(tx, from)? || !Self::container_exists(tx, to)? {
                return Ok(false);
            }
            let Some(row_id) = matches::find_row_id(tx, match_id, Self::container_id(from))? else {
                return Ok(false);
            };
            matches::append_to_container(tx, row_id, Self::container_id(to))?;
            Ok(true)
        })
    }
}

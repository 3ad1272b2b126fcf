// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the FreeSquash league portal.
//!
//! Stores the league (seasons, groups, players, memberships, matches),
//! season closures, season history, rollover records and the audit trail
//! in `SQLite` through Diesel.
//!
//! ## Transactions
//!
//! `persist_transition` writes a state change and its audit event in a
//! single transaction. Closure writes are additionally guarded by the
//! closure's `version`, and rollover records by a unique `closure_id`, so
//! two writers racing on the same closure cannot both succeed.
//!
//! ## Testing
//!
//! Tests use shared in-memory databases, one per `new_in_memory()` call.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::{Connection, SqliteConnection};
use freesquash::{State, TransitionResult};
use freesquash_audit::AuditEvent;
use freesquash_domain::{LeagueSnapshot, Season, SeasonClosure, SeasonHistoryRecord};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod convert;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the league database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition result in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails. Nothing is written in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        self.conn
            .transaction::<PersistTransitionResult, PersistenceError, _>(|conn| {
                mutations::persist_transition(conn, result)
            })
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Loads everything a command may need to read.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be read.
    pub fn load_state(&mut self) -> Result<State, PersistenceError> {
        queries::load_state(&mut self.conn)
    }

    /// Loads the league as a classification snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read.
    pub fn load_snapshot(&mut self) -> Result<LeagueSnapshot, PersistenceError> {
        queries::league::load_snapshot(&mut self.conn)
    }

    /// Lists every season, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the seasons cannot be read.
    pub fn list_seasons(&mut self) -> Result<Vec<Season>, PersistenceError> {
        queries::league::list_seasons(&mut self.conn)
    }

    /// Retrieves the closure of a season, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the closure cannot be read.
    pub fn get_closure(&mut self, season_id: i64) -> Result<Option<SeasonClosure>, PersistenceError> {
        queries::closure::get_closure(&mut self.conn, season_id)
    }

    /// Lists a player's season history, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be read.
    pub fn get_player_history(
        &mut self,
        player_id: i64,
    ) -> Result<Vec<SeasonHistoryRecord>, PersistenceError> {
        queries::closure::get_player_history(&mut self.conn, player_id)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or cannot be read.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves the audit timeline of a season.
    ///
    /// # Errors
    ///
    /// Returns an error if the events cannot be read.
    pub fn get_audit_timeline(&mut self, season_id: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, season_id)
    }
}

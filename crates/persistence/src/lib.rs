// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the tournament engine.
//!
//! Stores one JSON snapshot of the full tournament state per tournament and
//! an append-only audit event log, both in `SQLite` through Diesel.
//!
//! ## Storage Model
//!
//! - `tournament_snapshots` — one row per tournament, replaced on every save
//! - `audit_events` — one row per successful transition
//!
//! A reset removes both for the tournament being reset.
//!
//! ## Testing
//!
//! Tests run against isolated in-memory databases. Each call to
//! `Persistence::new_in_memory()` gets its own shared-cache database name.

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

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tourney::{SnapshotStore, State};
use tourney_audit::AuditEvent;
use tracing::info;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::TournamentSummary;
pub use error::PersistenceError;

/// Returns the current UTC time as an RFC 3339 string.
pub(crate) fn now_rfc3339() -> Result<String, PersistenceError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

/// Persistence adapter for tournament snapshots and audit events.
pub struct Persistence {
    conn: SqliteConnection,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // WAL for better read concurrency
        let mode: String = backend::sqlite::enable_wal_mode(&mut conn)?;
        info!(path = %path_str, journal_mode = %mode, "Opened tournament database");

        Ok(Self { conn })
    }

    // ========================================================================
    // Snapshots
    // ========================================================================

    /// Saves the full state, replacing any earlier snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_snapshot(&mut self, state: &State) -> Result<(), PersistenceError> {
        mutations::save_snapshot(&mut self.conn, state)
    }

    /// Loads the stored state of a tournament, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the snapshot does not decode.
    pub fn load_snapshot(&mut self, tournament: &str) -> Result<Option<State>, PersistenceError> {
        queries::load_snapshot(&mut self.conn, tournament)
    }

    /// Removes the snapshot and audit events of a tournament.
    ///
    /// # Returns
    ///
    /// The number of audit events removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_tournament(&mut self, tournament: &str) -> Result<usize, PersistenceError> {
        mutations::delete_tournament(&mut self.conn, tournament)
    }

    /// Lists every stored tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tournaments(&mut self) -> Result<Vec<TournamentSummary>, PersistenceError> {
        queries::list_tournaments(&mut self.conn)
    }

    // ========================================================================
    // Audit Events
    // ========================================================================

    /// Persists an audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned to the persisted audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Retrieves every audit event of a tournament, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        tournament: &str,
    ) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
        queries::get_audit_timeline(&mut self.conn, tournament)
    }

    /// Counts the audit events of a tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_audit_events(&mut self, tournament: &str) -> Result<i64, PersistenceError> {
        queries::count_audit_events(&mut self.conn, tournament)
    }
}

impl SnapshotStore for Persistence {
    type Error = PersistenceError;

    fn load_snapshot(&mut self, tournament: &str) -> Result<Option<State>, Self::Error> {
        Self::load_snapshot(self, tournament)
    }

    fn save_snapshot(&mut self, state: &State) -> Result<(), Self::Error> {
        Self::save_snapshot(self, state)
    }

    fn clear_snapshot(&mut self, tournament: &str) -> Result<(), Self::Error> {
        self.delete_tournament(tournament).map(|_| ())
    }

    fn record_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error> {
        self.persist_audit_event(event).map(|_| ())
    }
}

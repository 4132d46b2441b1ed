// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot persistence.
//!
//! A tournament has at most one snapshot row. Saving replaces it; deleting a
//! tournament removes the snapshot and its audit trail together.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tourney::State;
use tracing::{debug, info};

use crate::diesel_schema::{audit_events, tournament_snapshots};
use crate::error::PersistenceError;
use crate::now_rfc3339;

#[derive(Insertable)]
#[diesel(table_name = tournament_snapshots)]
struct SnapshotRow<'a> {
    tournament: &'a str,
    phase: &'a str,
    state_json: String,
    saved_at: String,
}

/// Saves the full state, replacing any earlier snapshot of the tournament.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save_snapshot(conn: &mut SqliteConnection, state: &State) -> Result<(), PersistenceError> {
    let row: SnapshotRow<'_> = SnapshotRow {
        tournament: state.name(),
        phase: state.phase.as_str(),
        state_json: serde_json::to_string(state)?,
        saved_at: now_rfc3339()?,
    };

    diesel::insert_into(tournament_snapshots::table)
        .values(&row)
        .on_conflict(tournament_snapshots::tournament)
        .do_update()
        .set((
            tournament_snapshots::phase.eq(row.phase),
            tournament_snapshots::state_json.eq(&row.state_json),
            tournament_snapshots::saved_at.eq(&row.saved_at),
        ))
        .execute(conn)?;

    debug!(
        tournament = %row.tournament,
        phase = %row.phase,
        bytes = row.state_json.len(),
        "Snapshot saved"
    );
    Ok(())
}

/// Removes a tournament's snapshot and audit events.
///
/// # Returns
///
/// The number of audit events removed.
///
/// # Errors
///
/// Returns an error if either delete fails. Neither delete is kept then.
pub fn delete_tournament(
    conn: &mut SqliteConnection,
    tournament: &str,
) -> Result<usize, PersistenceError> {
    let (snapshots, events): (usize, usize) = conn.transaction(|conn| {
        let snapshots: usize = diesel::delete(
            tournament_snapshots::table.filter(tournament_snapshots::tournament.eq(tournament)),
        )
        .execute(conn)?;
        let events: usize =
            diesel::delete(audit_events::table.filter(audit_events::tournament.eq(tournament)))
                .execute(conn)?;
        Ok::<_, diesel::result::Error>((snapshots, events))
    })?;

    info!(tournament, snapshots, events, "Tournament removed from store");
    Ok(events)
}

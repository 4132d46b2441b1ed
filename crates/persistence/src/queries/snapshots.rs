// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Snapshot queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tourney::State;
use tourney_domain::TournamentPhase;

use crate::data_models::TournamentSummary;
use crate::diesel_schema::tournament_snapshots;
use crate::error::PersistenceError;

/// Loads the stored state of a tournament.
///
/// # Returns
///
/// `None` if the tournament has never been saved or was reset.
///
/// # Errors
///
/// Returns an error if the query fails or the stored JSON does not decode.
pub fn load_snapshot(
    conn: &mut SqliteConnection,
    tournament: &str,
) -> Result<Option<State>, PersistenceError> {
    let json: Option<String> = tournament_snapshots::table
        .filter(tournament_snapshots::tournament.eq(tournament))
        .select(tournament_snapshots::state_json)
        .first(conn)
        .optional()?;

    json.map(|json| serde_json::from_str::<State>(&json))
        .transpose()
        .map_err(PersistenceError::from)
}

/// Lists every stored tournament, ordered by name.
///
/// # Errors
///
/// Returns an error if the query fails or a stored phase is unknown.
pub fn list_tournaments(
    conn: &mut SqliteConnection,
) -> Result<Vec<TournamentSummary>, PersistenceError> {
    let rows: Vec<(String, String, String)> = tournament_snapshots::table
        .order(tournament_snapshots::tournament.asc())
        .select((
            tournament_snapshots::tournament,
            tournament_snapshots::phase,
            tournament_snapshots::saved_at,
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(tournament, phase, saved_at)| {
            let phase: TournamentPhase = phase
                .parse()
                .map_err(|e: tourney_domain::DomainError| {
                    PersistenceError::ReconstructionError(e.to_string())
                })?;
            Ok(TournamentSummary {
                tournament,
                phase,
                saved_at,
            })
        })
        .collect()
}

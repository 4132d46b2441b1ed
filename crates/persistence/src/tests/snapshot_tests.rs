// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tourney::State;
use tourney_domain::TournamentPhase;

use crate::tests::{apply_ok, create_test_config, create_test_persistence, full_round_robin};
use crate::{Persistence, TournamentSummary};

fn played_state() -> State {
    full_round_robin()
        .into_iter()
        .fold(State::new(create_test_config()), |state, command| {
            apply_ok(&state, command).new_state
        })
}

#[test]
fn test_load_missing_snapshot_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.load_snapshot("Nowhere").unwrap().is_none());
}

#[test]
fn test_snapshot_round_trip_preserves_bracket() {
    let mut persistence: Persistence = create_test_persistence();
    let state: State = played_state();
    assert_eq!(state.phase, TournamentPhase::Semifinals);

    persistence.save_snapshot(&state).unwrap();
    let loaded: State = persistence.load_snapshot("Club Night").unwrap().unwrap();

    assert_eq!(loaded, state);
    assert!(loaded.bracket.is_some());
}

#[test]
fn test_save_replaces_previous_snapshot() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .save_snapshot(&State::new(create_test_config()))
        .unwrap();
    persistence.save_snapshot(&played_state()).unwrap();

    let tournaments: Vec<TournamentSummary> = persistence.list_tournaments().unwrap();
    assert_eq!(tournaments.len(), 1);
    assert_eq!(tournaments[0].tournament, "Club Night");
    assert_eq!(tournaments[0].phase, TournamentPhase::Semifinals);

    let loaded: State = persistence.load_snapshot("Club Night").unwrap().unwrap();
    assert_eq!(loaded.ledger.len(), 6);
}

#[test]
fn test_saved_at_is_rfc3339() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .save_snapshot(&State::new(create_test_config()))
        .unwrap();

    let summary: TournamentSummary = persistence.list_tournaments().unwrap().remove(0);
    assert!(
        time::OffsetDateTime::parse(
            &summary.saved_at,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok()
    );
}

#[test]
fn test_delete_tournament_removes_only_that_tournament() {
    let mut persistence: Persistence = create_test_persistence();
    let mut other_config = create_test_config();
    other_config.name = String::from("Other Night");

    persistence
        .save_snapshot(&State::new(create_test_config()))
        .unwrap();
    persistence
        .save_snapshot(&State::new(other_config))
        .unwrap();

    persistence.delete_tournament("Club Night").unwrap();

    assert!(persistence.load_snapshot("Club Night").unwrap().is_none());
    assert!(persistence.load_snapshot("Other Night").unwrap().is_some());
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tourney_domain::{Entrant, KnockoutRound, StandingsRow};

use crate::tests::helpers::{
    apply_all, create_round_robin_config, create_six_by_six_config, knockout,
    no_tie_loser_score, six_by_six_results, submit, three_way_results,
};
use crate::{GroupProgress, MatchList, RoundView, State};

#[test]
fn test_fresh_state_views() {
    let state: State = State::new(create_six_by_six_config());

    assert_eq!(
        state.group_progress(),
        GroupProgress {
            played: 0,
            total: 36
        }
    );
    assert!(state.bracket_view().is_empty());
    assert!(state.pending_tie_breakers().is_empty());
    assert!(state.podium().is_none());

    let standings: Vec<StandingsRow> = state.standings();
    assert_eq!(standings.len(), 12);
    assert_eq!(standings[0].entrant, Entrant::new("A1"));
    assert_eq!(standings[11].position, 12);
}

#[test]
fn test_match_list_splits_played_and_remaining() {
    let state: State = apply_all(
        State::new(create_round_robin_config()),
        vec![submit("W", "X", 11, 3), submit("Z", "Y", 11, 9)],
    );

    let list: MatchList = state.match_list();
    assert_eq!(list.played.len(), 2);
    assert_eq!(list.played[1].0, 1);
    assert_eq!(list.played[1].1.entrant_a, Entrant::new("Z"));
    assert_eq!(list.remaining.len(), 4);
    assert!(
        !list
            .remaining
            .contains(&(Entrant::new("W"), Entrant::new("X")))
    );
    assert_eq!(
        state.group_progress(),
        GroupProgress {
            played: 2,
            total: 6
        }
    );
}

#[test]
fn test_standings_rank_by_wins_then_points() {
    let state: State = apply_all(
        State::new(create_six_by_six_config()),
        six_by_six_results(&[], no_tie_loser_score),
    );

    let order: Vec<String> = state
        .standings()
        .iter()
        .map(|row| row.entrant.to_string())
        .collect();
    assert_eq!(
        order,
        vec!["A1", "B1", "A2", "B2", "A3", "B3", "A4", "B4", "A5", "B5", "A6", "B6"]
    );
    let b2 = &state.standings()[3];
    assert_eq!((b2.stats.wins, b2.stats.total_points), (4, 58));
}

#[test]
fn test_bracket_view_lists_seeded_rounds() {
    let state: State = apply_all(
        State::new(create_six_by_six_config()),
        six_by_six_results(&[], no_tie_loser_score),
    );
    let rounds: Vec<RoundView> = state.bracket_view();
    assert_eq!(rounds.len(), 1);
    assert_eq!(rounds[0].round, KnockoutRound::Quarterfinal);
    assert_eq!(rounds[0].slots.len(), 4);

    let state: State = apply_all(
        state,
        (0..4)
            .map(|slot| knockout(KnockoutRound::Quarterfinal, slot, 11, 6))
            .collect(),
    );
    let rounds: Vec<KnockoutRound> = state.bracket_view().iter().map(|r| r.round).collect();
    assert_eq!(
        rounds,
        vec![KnockoutRound::Quarterfinal, KnockoutRound::Semifinal]
    );
}

#[test]
fn test_pending_tie_breakers_shrink_as_results_arrive() {
    let state: State = apply_all(State::new(create_six_by_six_config()), three_way_results());
    assert_eq!(state.pending_tie_breakers().len(), 3);

    let state: State = apply_all(
        state,
        vec![crate::tests::helpers::tie_breaker("A6", "A5", 11, 2)],
    );
    let pending = state.pending_tie_breakers();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|p| p.entrant_b == Entrant::new("B4")));
}

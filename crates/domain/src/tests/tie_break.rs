// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    create_cyclic_ledger, create_head_to_head_ledger, create_round_robin_config,
    create_six_by_six_config, entrant, record,
};
use crate::{
    DomainError, HeadToHead, MatchLedger, StatsTable, TieBreakMethod, TieBreakerGroup, TieGroup,
    TiePolicy, TieResolution, TournamentConfig, detect_material_ties, head_to_head, is_material,
    rank,
};

fn cyclic_group() -> (MatchLedger, TieGroup) {
    let config: TournamentConfig = create_round_robin_config();
    let (ledger, table) = create_cyclic_ledger(&config);
    let mut groups: Vec<TieGroup> =
        detect_material_ties(&rank(&table), 2, TiePolicy::StraddleCutoff);
    assert_eq!(groups.len(), 1);
    (ledger, groups.remove(0))
}

#[test]
fn test_is_material_straddle_cutoff() {
    assert!(is_material(7, 9, 8, TiePolicy::StraddleCutoff));
    assert!(is_material(8, 9, 8, TiePolicy::StraddleCutoff));
    assert!(!is_material(6, 8, 8, TiePolicy::StraddleCutoff));
    assert!(!is_material(9, 10, 8, TiePolicy::StraddleCutoff));
}

#[test]
fn test_is_material_within_margin() {
    let policy: TiePolicy = TiePolicy::WithinMargin { margin: 2 };
    assert!(is_material(6, 8, 8, policy));
    assert!(is_material(10, 11, 8, policy));
    assert!(!is_material(11, 12, 8, policy));
}

#[test]
fn test_is_material_within_unbounded_margin() {
    let policy: TiePolicy = TiePolicy::WithinMargin { margin: usize::MAX };
    assert!(is_material(1, 2, 8, policy));
    assert!(is_material(11, 12, 8, policy));
    assert!(!is_material(4, 4, 8, policy));
}

#[test]
fn test_detect_material_ties_with_unbounded_margin() {
    let config: TournamentConfig = create_round_robin_config();
    let (_, table) = create_cyclic_ledger(&config);
    let groups: Vec<TieGroup> = detect_material_ties(
        &rank(&table),
        2,
        TiePolicy::WithinMargin { margin: usize::MAX },
    );
    assert_eq!(groups.len(), 1);
    assert_eq!((groups[0].range_start, groups[0].range_end), (2, 4));
}

#[test]
fn test_single_position_is_never_material() {
    assert!(!is_material(8, 8, 8, TiePolicy::StraddleCutoff));
    assert!(!is_material(8, 8, 8, TiePolicy::WithinMargin { margin: 3 }));
}

#[test]
fn test_detect_finds_group_straddling_cutoff() {
    let config: TournamentConfig = create_round_robin_config();
    let (_, table) = create_cyclic_ledger(&config);

    let groups: Vec<TieGroup> = detect_material_ties(&rank(&table), 2, TiePolicy::StraddleCutoff);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].teams, vec![entrant("X"), entrant("Y"), entrant("Z")]);
    assert_eq!((groups[0].range_start, groups[0].range_end), (2, 4));
}

#[test]
fn test_detect_ignores_group_not_straddling_cutoff() {
    let config: TournamentConfig = create_round_robin_config();
    let (_, table) = create_cyclic_ledger(&config);

    assert!(detect_material_ties(&rank(&table), 1, TiePolicy::StraddleCutoff).is_empty());
    assert!(detect_material_ties(&rank(&table), 4, TiePolicy::StraddleCutoff).is_empty());
}

#[test]
fn test_detect_within_margin_reaches_below_cutoff() {
    let config: TournamentConfig = create_round_robin_config();
    let (_, table) = create_cyclic_ledger(&config);

    let groups: Vec<TieGroup> =
        detect_material_ties(&rank(&table), 1, TiePolicy::WithinMargin { margin: 1 });
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_detect_on_empty_table_finds_everyone_level() {
    let config: TournamentConfig = create_six_by_six_config();
    let table: StatsTable = StatsTable::new(&config);

    let groups: Vec<TieGroup> = detect_material_ties(&rank(&table), 8, TiePolicy::StraddleCutoff);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].teams.len(), 12);
}

#[test]
fn test_head_to_head_decides_two_team_tie() {
    let config: TournamentConfig = create_round_robin_config();
    let (ledger, table) = create_head_to_head_ledger(&config);

    let groups: Vec<TieGroup> = detect_material_ties(&rank(&table), 2, TiePolicy::StraddleCutoff);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].teams, vec![entrant("X"), entrant("Y")]);

    match head_to_head(&groups[0], &ledger) {
        HeadToHead::Decided(order) => {
            assert_eq!(order[0].entrant, entrant("X"));
            assert_eq!(order[0].wins, 1);
            assert_eq!(order[1].entrant, entrant("Y"));
        }
        other => panic!("expected a decided head-to-head, got {other:?}"),
    }

    let group: TieBreakerGroup = TieBreakerGroup::open(groups[0].clone(), &ledger);
    assert!(group.is_resolved());
    assert!(group.matches.is_empty());
    assert_eq!(group.resolution, Some(TieResolution::HeadToHead));
    let marks = group.marks();
    assert_eq!(marks[0].0, entrant("X"));
    assert_eq!(marks[0].1.rank, 0);
    assert_eq!(marks[1].1.method, TieBreakMethod::HeadToHead);
}

#[test]
fn test_head_to_head_cycle_is_inconclusive() {
    let (ledger, group) = cyclic_group();
    assert_eq!(head_to_head(&group, &ledger), HeadToHead::Inconclusive);
}

#[test]
fn test_head_to_head_needs_every_pairing() {
    let config: TournamentConfig = create_six_by_six_config();
    let mut ledger: MatchLedger = MatchLedger::new();
    let mut table: StatsTable = StatsTable::new(&config);
    record(&config, &mut ledger, &mut table, "A1", "B1", 11, 5);

    let group: TieGroup = TieGroup {
        teams: vec![entrant("A2"), entrant("A3")],
        range_start: 8,
        range_end: 9,
    };
    assert_eq!(head_to_head(&group, &ledger), HeadToHead::Incomplete);
}

#[test]
fn test_open_schedules_one_match_per_pair() {
    let (ledger, group) = cyclic_group();
    let breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    assert!(!breaker.is_resolved());
    assert_eq!(breaker.matches.len(), 3);
    assert_eq!(breaker.pending_matches().len(), 3);
    assert_eq!(breaker.matches[0].entrant_a, entrant("X"));
    assert_eq!(breaker.matches[0].entrant_b, entrant("Y"));
    assert!(breaker.schedules(&entrant("Z"), &entrant("X")));
    assert!(!breaker.schedules(&entrant("W"), &entrant("X")));
}

#[test]
fn test_playoff_points_separate_leader_only() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    assert!(!breaker.submit(&entrant("X"), &entrant("Y"), 6, 3).unwrap());
    assert!(!breaker.submit(&entrant("Y"), &entrant("Z"), 5, 3).unwrap());
    assert!(breaker.submit(&entrant("Z"), &entrant("X"), 5, 4).unwrap());

    // One win each. X leads on 10 points; Y and Z stay level on 8.
    assert!(matches!(
        breaker.resolution,
        Some(TieResolution::Fallback { ref residual }) if residual.len() == 2
    ));
    assert_eq!(breaker.order[0].entrant, entrant("X"));
}

#[test]
fn test_playoff_without_residual_tie() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    breaker.submit(&entrant("X"), &entrant("Y"), 5, 3).unwrap();
    breaker.submit(&entrant("Y"), &entrant("Z"), 5, 3).unwrap();
    breaker.submit(&entrant("X"), &entrant("Z"), 5, 3).unwrap();

    assert_eq!(breaker.resolution, Some(TieResolution::Playoff));
    let marks = breaker.marks();
    let order: Vec<&str> = marks.iter().map(|(e, _)| e.name()).collect();
    assert_eq!(order, vec!["X", "Y", "Z"]);
    assert_eq!(marks[0].1.wins, 2);
    assert_eq!(marks[0].1.points, 10);
    assert!(marks.iter().all(|(_, m)| m.method == TieBreakMethod::Playoff));
}

#[test]
fn test_playoff_cycle_falls_back_to_standings_order() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    breaker.submit(&entrant("X"), &entrant("Y"), 5, 3).unwrap();
    breaker.submit(&entrant("Y"), &entrant("Z"), 5, 3).unwrap();
    breaker.submit(&entrant("Z"), &entrant("X"), 5, 3).unwrap();

    match &breaker.resolution {
        Some(TieResolution::Fallback { residual }) => assert_eq!(residual.len(), 3),
        other => panic!("expected a fallback resolution, got {other:?}"),
    }
    let marks = breaker.marks();
    let order: Vec<&str> = marks.iter().map(|(e, _)| e.name()).collect();
    assert_eq!(order, vec!["X", "Y", "Z"]);
    assert!(marks.iter().all(|(_, m)| m.method == TieBreakMethod::Fallback));
}

#[test]
fn test_submit_accepts_reversed_orientation() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    breaker.submit(&entrant("Y"), &entrant("X"), 3, 5).unwrap();
    let result = breaker.matches[0].result.as_ref().unwrap();
    assert_eq!(result.entrant_a, entrant("X"));
    assert_eq!((result.score_a, result.score_b), (5, 3));
}

#[test]
fn test_submit_rejects_duplicate_draw_and_unscheduled() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);
    breaker.submit(&entrant("X"), &entrant("Y"), 5, 3).unwrap();

    assert!(matches!(
        breaker.submit(&entrant("Y"), &entrant("X"), 5, 3),
        Err(DomainError::DuplicateMatch { .. })
    ));
    assert!(matches!(
        breaker.submit(&entrant("Y"), &entrant("Z"), 4, 4),
        Err(DomainError::DrawNotAllowed { .. })
    ));
    assert!(matches!(
        breaker.submit(&entrant("W"), &entrant("Z"), 5, 3),
        Err(DomainError::TieBreakerMatchNotFound { .. })
    ));
}

#[test]
fn test_submit_rejects_resolved_group() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);
    breaker.submit(&entrant("X"), &entrant("Y"), 5, 3).unwrap();
    breaker.submit(&entrant("Y"), &entrant("Z"), 5, 3).unwrap();
    breaker.submit(&entrant("X"), &entrant("Z"), 5, 3).unwrap();

    assert!(matches!(
        breaker.submit(&entrant("X"), &entrant("Y"), 5, 3),
        Err(DomainError::TieGroupAlreadyResolved {
            range_start: 2,
            range_end: 4
        })
    ));
}

#[test]
fn test_edit_re_resolves_group() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);
    breaker.submit(&entrant("X"), &entrant("Y"), 5, 3).unwrap();
    breaker.submit(&entrant("Y"), &entrant("Z"), 5, 3).unwrap();
    breaker.submit(&entrant("Z"), &entrant("X"), 5, 3).unwrap();
    assert!(matches!(
        breaker.resolution,
        Some(TieResolution::Fallback { .. })
    ));

    assert!(breaker.edit(&entrant("Z"), &entrant("X"), 3, 5).unwrap());
    assert_eq!(breaker.resolution, Some(TieResolution::Playoff));
    assert_eq!(breaker.order[0].entrant, entrant("X"));
}

#[test]
fn test_edit_rejects_unrecorded_match() {
    let (ledger, group) = cyclic_group();
    let mut breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);

    assert!(matches!(
        breaker.edit(&entrant("X"), &entrant("Y"), 5, 3),
        Err(DomainError::Validation { .. })
    ));
}

#[test]
fn test_pending_group_has_no_marks() {
    let (ledger, group) = cyclic_group();
    let breaker: TieBreakerGroup = TieBreakerGroup::open(group, &ledger);
    assert!(breaker.marks().is_empty());
}

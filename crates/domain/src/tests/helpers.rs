// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{
    Entrant, MatchLedger, MatchRecord, Qualifiers, Schedule, StatsTable, TiePolicy,
    TournamentConfig,
};

pub fn entrant(name: &str) -> Entrant {
    Entrant::new(name)
}

pub fn entrants(names: &[&str]) -> Vec<Entrant> {
    names.iter().map(|n| Entrant::new(n)).collect()
}

/// Six entrants per pool, cross-pool schedule, eight qualifiers.
pub fn create_six_by_six_config() -> TournamentConfig {
    TournamentConfig::new(
        "Spring Cup",
        &["A1", "A2", "A3", "A4", "A5", "A6"],
        &["B1", "B2", "B3", "B4", "B5", "B6"],
        Schedule::CrossPool,
        Qualifiers::Eight,
        TiePolicy::StraddleCutoff,
    )
    .unwrap()
}

/// Four entrants, single round robin, four qualifiers.
pub fn create_round_robin_config() -> TournamentConfig {
    TournamentConfig::new(
        "Club Night",
        &["W", "X", "Y", "Z"],
        &[],
        Schedule::RoundRobin,
        Qualifiers::Four,
        TiePolicy::StraddleCutoff,
    )
    .unwrap()
}

/// Submits a result to the ledger and applies it to the table.
pub fn record(
    config: &TournamentConfig,
    ledger: &mut MatchLedger,
    table: &mut StatsTable,
    a: &str,
    b: &str,
    score_a: u32,
    score_b: u32,
) -> MatchRecord {
    let record: MatchRecord = ledger
        .submit(config, entrant(a), entrant(b), score_a, score_b)
        .unwrap();
    table.apply_result(&record).unwrap();
    record
}

/// W beats everyone; X, Y and Z beat each other in a cycle, all ending on
/// one win and 20 points.
pub fn create_cyclic_ledger(config: &TournamentConfig) -> (MatchLedger, StatsTable) {
    let mut ledger: MatchLedger = MatchLedger::new();
    let mut table: StatsTable = StatsTable::new(config);
    record(config, &mut ledger, &mut table, "W", "X", 10, 5);
    record(config, &mut ledger, &mut table, "W", "Y", 10, 5);
    record(config, &mut ledger, &mut table, "W", "Z", 10, 5);
    record(config, &mut ledger, &mut table, "X", "Y", 10, 5);
    record(config, &mut ledger, &mut table, "Y", "Z", 10, 5);
    record(config, &mut ledger, &mut table, "X", "Z", 5, 10);
    (ledger, table)
}

/// W beats everyone; X and Y finish level on one win and 23 points, with
/// X having beaten Y. Z trails on 19 points.
pub fn create_head_to_head_ledger(config: &TournamentConfig) -> (MatchLedger, StatsTable) {
    let mut ledger: MatchLedger = MatchLedger::new();
    let mut table: StatsTable = StatsTable::new(config);
    record(config, &mut ledger, &mut table, "W", "X", 10, 5);
    record(config, &mut ledger, &mut table, "W", "Y", 10, 5);
    record(config, &mut ledger, &mut table, "W", "Z", 10, 5);
    record(config, &mut ledger, &mut table, "X", "Y", 10, 8);
    record(config, &mut ledger, &mut table, "Y", "Z", 10, 4);
    record(config, &mut ledger, &mut table, "X", "Z", 8, 10);
    (ledger, table)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use tourney_audit::{Actor, AuditEvent, Cause};
use tourney_domain::{KnockoutRound, Qualifiers, Schedule, TiePolicy, TournamentConfig};

use crate::{Command, SnapshotStore, State, TransitionResult, apply};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("scorer"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-1"), String::from("Test command"))
}

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

pub fn submit(a: &str, b: &str, score_a: u32, score_b: u32) -> Command {
    Command::SubmitMatch {
        entrant_a: String::from(a),
        entrant_b: String::from(b),
        score_a,
        score_b,
    }
}

pub fn tie_breaker(a: &str, b: &str, score_a: u32, score_b: u32) -> Command {
    Command::SubmitTieBreaker {
        entrant_a: String::from(a),
        entrant_b: String::from(b),
        score_a,
        score_b,
    }
}

pub fn knockout(round: KnockoutRound, slot: usize, score_a: u32, score_b: u32) -> Command {
    Command::SubmitKnockout {
        round,
        slot,
        score_a,
        score_b,
    }
}

pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}

pub fn apply_all(state: State, commands: Vec<Command>) -> State {
    commands
        .into_iter()
        .fold(state, |state, command| apply_ok(&state, command).new_state)
}

/// Full 6x6 cross-pool results.
///
/// `A{i}` beats `B{j}` when `i <= j` unless the pairing is listed in
/// `flips`. Winners score 11; losers score `loser_score(loser)`.
pub fn six_by_six_results(
    flips: &[(&str, &str)],
    loser_score: impl Fn(&str) -> u32,
) -> Vec<Command> {
    let mut commands: Vec<Command> = Vec::new();
    for i in 1..=6 {
        for j in 1..=6 {
            let a: String = format!("A{i}");
            let b: String = format!("B{j}");
            let mut a_wins: bool = i <= j;
            if flips.contains(&(a.as_str(), b.as_str())) {
                a_wins = !a_wins;
            }
            let (score_a, score_b) = if a_wins {
                (11, loser_score(&b))
            } else {
                (loser_score(&a), 11)
            };
            commands.push(submit(&a, &b, score_a, score_b));
        }
    }
    commands
}

/// Pool A losers score 3 and Pool B losers score 7. No two entrants finish
/// level on wins and points.
pub fn no_tie_loser_score(loser: &str) -> u32 {
    if loser.starts_with('A') { 3 } else { 7 }
}

/// Like [`no_tie_loser_score`] but A5 scores 7, leaving A5 and B4 level on
/// two wins and 50 points at positions 8 and 9.
pub fn head_to_head_loser_score(loser: &str) -> u32 {
    if loser == "A5" {
        7
    } else {
        no_tie_loser_score(loser)
    }
}

/// A6 beats B5 and every loser scores 5, leaving A5, A6 and B4 level on two
/// wins and 42 points at positions 8 to 10.
pub fn three_way_results() -> Vec<Command> {
    six_by_six_results(&[("A6", "B5")], |_| 5)
}

pub fn names(entrants: &[tourney_domain::Entrant]) -> Vec<&str> {
    entrants.iter().map(tourney_domain::Entrant::name).collect()
}

#[derive(Debug)]
pub struct MemoryStoreError(pub String);

impl std::fmt::Display for MemoryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory store: {}", self.0)
    }
}

impl std::error::Error for MemoryStoreError {}

/// A snapshot store that keeps JSON snapshots in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub snapshots: HashMap<String, String>,
    pub events: Vec<AuditEvent>,
    pub fail_writes: bool,
    pub fail_reads: bool,
}

impl SnapshotStore for MemoryStore {
    type Error = MemoryStoreError;

    fn load_snapshot(&mut self, tournament: &str) -> Result<Option<State>, Self::Error> {
        if self.fail_reads {
            return Err(MemoryStoreError(String::from("read failed")));
        }
        self.snapshots
            .get(tournament)
            .map(|json| serde_json::from_str(json))
            .transpose()
            .map_err(|e| MemoryStoreError(e.to_string()))
    }

    fn save_snapshot(&mut self, state: &State) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("write failed")));
        }
        let json: String =
            serde_json::to_string(state).map_err(|e| MemoryStoreError(e.to_string()))?;
        self.snapshots.insert(state.name().to_string(), json);
        Ok(())
    }

    fn clear_snapshot(&mut self, tournament: &str) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("write failed")));
        }
        self.snapshots.remove(tournament);
        self.events.retain(|event| event.tournament != tournament);
        Ok(())
    }

    fn record_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryStoreError(String::from("write failed")));
        }
        self.events.push(event.clone());
        Ok(())
    }
}

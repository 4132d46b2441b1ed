// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod snapshot_tests;

use tourney::{Command, State, TransitionResult, apply};
use tourney_audit::{Actor, Cause};
use tourney_domain::{Qualifiers, Schedule, TiePolicy, TournamentConfig};

use crate::Persistence;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory database")
}

pub fn create_test_config() -> TournamentConfig {
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

/// Every round-robin match; W beats everyone, then X, then Y.
pub fn full_round_robin() -> Vec<Command> {
    vec![
        submit("W", "X", 11, 3),
        submit("W", "Y", 11, 4),
        submit("W", "Z", 11, 5),
        submit("X", "Y", 11, 6),
        submit("X", "Z", 11, 7),
        submit("Y", "Z", 11, 8),
    ]
}

pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}

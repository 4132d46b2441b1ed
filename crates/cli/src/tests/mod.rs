// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use tourney::{Command, State, apply};
use tourney_audit::{Actor, Cause};

pub const CUP_JSON: &str = r#"{
    "name": "Spring Cup",
    "pool_a": ["A1", "A2", "A3", "A4", "A5", "A6"],
    "pool_b": ["B1", "B2", "B3", "B4", "B5", "B6"],
    "schedule": "cross_pool",
    "qualifiers": "eight",
    "tie_policy": "straddle_cutoff"
}"#;

pub const CLUB_JSON: &str = r#"{
    "name": "Club Night",
    "pool_a": ["W", "X", "Y", "Z"],
    "schedule": "round_robin",
    "qualifiers": "four"
}"#;

pub fn apply_all(state: State, commands: Vec<Command>) -> State {
    commands.into_iter().fold(state, |state, command| {
        apply(
            &state,
            command,
            Actor::new(String::from("tester"), String::from("operator")),
            Cause::new(String::from("test"), String::from("Test")),
        )
        .unwrap()
        .new_state
    })
}

pub fn submit(a: &str, b: &str, score_a: u32, score_b: u32) -> Command {
    Command::SubmitMatch {
        entrant_a: String::from(a),
        entrant_b: String::from(b),
        score_a,
        score_b,
    }
}

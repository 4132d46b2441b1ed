// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tourney_domain::KnockoutRound;

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes. Entrants are named
/// as entered and resolved against the configuration when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a group-stage result.
    SubmitMatch {
        /// The first entrant (Pool A in cross-pool schedules).
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
        /// Points scored by `entrant_a`.
        score_a: u32,
        /// Points scored by `entrant_b`.
        score_b: u32,
    },
    /// Replace the scores of a recorded group-stage result.
    EditMatch {
        /// Ledger index of the result.
        index: usize,
        /// New points for the record's first entrant.
        score_a: u32,
        /// New points for the record's second entrant.
        score_b: u32,
    },
    /// Delete a recorded group-stage result so it can be re-entered.
    RemoveMatch {
        /// Ledger index of the result.
        index: usize,
    },
    /// Record a tie-breaker result.
    SubmitTieBreaker {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
        /// Points scored by `entrant_a`.
        score_a: u32,
        /// Points scored by `entrant_b`.
        score_b: u32,
    },
    /// Replace a recorded tie-breaker result.
    EditTieBreaker {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
        /// New points for `entrant_a`.
        score_a: u32,
        /// New points for `entrant_b`.
        score_b: u32,
    },
    /// Record a knockout result.
    SubmitKnockout {
        /// The knockout round.
        round: KnockoutRound,
        /// The slot within the round, 0-indexed.
        slot: usize,
        /// Points scored by the slot's first entrant.
        score_a: u32,
        /// Points scored by the slot's second entrant.
        score_b: u32,
    },
    /// Replace a recorded knockout result.
    EditKnockout {
        /// The knockout round.
        round: KnockoutRound,
        /// The slot within the round, 0-indexed.
        slot: usize,
        /// New points for the slot's first entrant.
        score_a: u32,
        /// New points for the slot's second entrant.
        score_b: u32,
    },
    /// Discard every result and start over from the configuration.
    ResetTournament {
        /// Must be `true`; the caller is responsible for asking.
        confirmed: bool,
    },
}

impl Command {
    /// Returns the command name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SubmitMatch { .. } => "SubmitMatch",
            Self::EditMatch { .. } => "EditMatch",
            Self::RemoveMatch { .. } => "RemoveMatch",
            Self::SubmitTieBreaker { .. } => "SubmitTieBreaker",
            Self::EditTieBreaker { .. } => "EditTieBreaker",
            Self::SubmitKnockout { .. } => "SubmitKnockout",
            Self::EditKnockout { .. } => "EditKnockout",
            Self::ResetTournament { .. } => "ResetTournament",
        }
    }
}

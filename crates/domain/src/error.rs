// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

use crate::bracket::KnockoutRound;
use crate::types::TournamentPhase;

/// Errors that can occur during domain validation.
///
/// Every variant is raised before any state is touched. Callers report
/// the message to the operator and keep the previous state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed or missing input.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// The input field that failed validation.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
    /// Equal scores were submitted. Draws are never a legal outcome.
    #[error("Draw not allowed: {entrant_a} vs {entrant_b} ended {score}-{score}")]
    DrawNotAllowed {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
        /// The shared score.
        score: u32,
    },
    /// The pairing has already been recorded.
    #[error("Match between '{entrant_a}' and '{entrant_b}' has already been played")]
    DuplicateMatch {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
    },
    /// The entrants may not meet under the configured schedule.
    #[error("Invalid matchup '{entrant_a}' vs '{entrant_b}': {reason}")]
    InvalidMatchup {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
        /// Why the pairing is not allowed.
        reason: String,
    },
    /// A bracket stage cannot be seeded from the available entrants.
    #[error("Cannot seed {stage}: {reason}")]
    IncompleteSeeding {
        /// The stage being seeded.
        stage: String,
        /// Why seeding failed.
        reason: String,
    },
    /// The named entrant is not registered in this tournament.
    #[error("Unknown entrant '{0}'")]
    UnknownEntrant(String),
    /// No group-stage match exists at the given ledger index.
    #[error("No recorded match at index {index}")]
    MatchNotFound {
        /// The requested ledger index.
        index: usize,
    },
    /// No tie-breaker match is scheduled between the two entrants.
    #[error("No tie-breaker match scheduled between '{entrant_a}' and '{entrant_b}'")]
    TieBreakerMatchNotFound {
        /// The first entrant.
        entrant_a: String,
        /// The second entrant.
        entrant_b: String,
    },
    /// The tie group has already been fully resolved.
    #[error("Tie group at positions {range_start}-{range_end} is already resolved")]
    TieGroupAlreadyResolved {
        /// First standings position covered by the group.
        range_start: usize,
        /// Last standings position covered by the group.
        range_end: usize,
    },
    /// The knockout slot does not exist in this bracket.
    #[error("{round} slot {slot} does not exist")]
    KnockoutSlotNotFound {
        /// The knockout round.
        round: KnockoutRound,
        /// The requested slot index.
        slot: usize,
    },
    /// The knockout round has not been seeded yet.
    #[error("{round} has not been seeded yet")]
    StageNotReady {
        /// The knockout round.
        round: KnockoutRound,
    },
    /// The knockout slot already holds a result; use an edit instead.
    #[error("{round} slot {slot} already has a result")]
    KnockoutAlreadyRecorded {
        /// The knockout round.
        round: KnockoutRound,
        /// The slot index.
        slot: usize,
    },
    /// The knockout slot has no result to edit.
    #[error("{round} slot {slot} has no result to edit")]
    KnockoutNotRecorded {
        /// The knockout round.
        round: KnockoutRound,
        /// The slot index.
        slot: usize,
    },
    /// The operation is not permitted in the current phase.
    #[error("Cannot {operation} while the tournament is in phase {phase}")]
    WrongPhase {
        /// The operation that was attempted.
        operation: String,
        /// The current phase.
        phase: TournamentPhase,
    },
    /// The tournament configuration is invalid.
    #[error("Invalid tournament configuration: {0}")]
    InvalidConfiguration(String),
    /// A reset was requested without confirmation.
    #[error("Tournament reset requires explicit confirmation")]
    ResetNotConfirmed,
    /// A phase string could not be parsed.
    #[error("Invalid tournament phase: {0}")]
    InvalidPhase(String),
}

impl DomainError {
    /// Builds a `Validation` error for the named field.
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

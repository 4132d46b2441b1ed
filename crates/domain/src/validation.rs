// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Entrant, Pool, Schedule, TournamentConfig};

/// The highest score a single side may record in one match.
///
/// Keeps every accumulated points total far inside `u32`.
pub const MAX_SCORE: u32 = 999;

/// Parses a score entered as text.
///
/// # Arguments
///
/// * `field` - The name of the input field, used in the error message
/// * `raw` - The raw text entered by the operator
///
/// # Returns
///
/// * `Ok(u32)` if the text is a whole number no greater than `MAX_SCORE`
/// * `Err(DomainError::Validation)` otherwise
///
/// # Errors
///
/// Returns an error if the text is empty, not a non-negative integer, or
/// above `MAX_SCORE`.
pub fn parse_score(field: &str, raw: &str) -> Result<u32, DomainError> {
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "a score is required"));
    }
    let score: u32 = trimmed.parse::<u32>().map_err(|_| {
        DomainError::validation(
            field,
            format!("'{trimmed}' is not a non-negative whole number"),
        )
    })?;
    validate_score_bound(field, score)?;
    Ok(score)
}

fn validate_score_bound(field: &str, score: u32) -> Result<(), DomainError> {
    if score > MAX_SCORE {
        return Err(DomainError::validation(
            field,
            format!("{score} is above the maximum score of {MAX_SCORE}"),
        ));
    }
    Ok(())
}

/// Validates that a pair of scores is in range and produces a winner.
///
/// This rule applies to every match in the tournament: group stage,
/// tie-breakers and knockouts.
///
/// # Errors
///
/// Returns `DomainError::Validation` if either score is above `MAX_SCORE`,
/// or `DomainError::DrawNotAllowed` if the scores are equal.
pub fn validate_scores(
    entrant_a: &Entrant,
    entrant_b: &Entrant,
    score_a: u32,
    score_b: u32,
) -> Result<(), DomainError> {
    validate_score_bound("score_a", score_a)?;
    validate_score_bound("score_b", score_b)?;
    if score_a == score_b {
        return Err(DomainError::DrawNotAllowed {
            entrant_a: entrant_a.name().to_string(),
            entrant_b: entrant_b.name().to_string(),
            score: score_a,
        });
    }
    Ok(())
}

/// Validates that two entrants may meet in the group stage.
///
/// # Errors
///
/// Returns `DomainError::InvalidMatchup` if:
/// - Both sides are the same entrant
/// - The schedule is cross-pool and `entrant_a` is not in Pool A or
///   `entrant_b` is not in Pool B
pub fn validate_matchup(
    config: &TournamentConfig,
    entrant_a: &Entrant,
    entrant_b: &Entrant,
) -> Result<(), DomainError> {
    if entrant_a == entrant_b {
        return Err(DomainError::InvalidMatchup {
            entrant_a: entrant_a.name().to_string(),
            entrant_b: entrant_b.name().to_string(),
            reason: String::from("an entrant cannot play itself"),
        });
    }

    if config.schedule == Schedule::CrossPool {
        let pool_a: Option<Pool> = config.pool_of(entrant_a);
        let pool_b: Option<Pool> = config.pool_of(entrant_b);
        if pool_a != Some(Pool::A) || pool_b != Some(Pool::B) {
            return Err(DomainError::InvalidMatchup {
                entrant_a: entrant_a.name().to_string(),
                entrant_b: entrant_b.name().to_string(),
                reason: String::from("the first entrant must be from Pool A and the second from Pool B"),
            });
        }
    }

    Ok(())
}

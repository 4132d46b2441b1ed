// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::{debug, info};

use crate::command::Command;
use crate::error::CoreError;
use crate::progression::{
    apply_marks, derive_phase, discard_bracket, invalidate, note_resolution, progress,
};
use crate::state::{Change, State, TransitionResult};
use tourney_audit::{Action, Actor, AuditEvent, Cause};
use tourney_domain::{
    Bracket, BracketChange, DomainError, Entrant, KnockoutRound, MatchRecord, PairKey,
    TieBreakerGroup, TournamentPhase,
};

/// Applies a command to the current state, producing a new state and audit event.
///
/// The input state is never modified. On error nothing has changed and no
/// audit event exists.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, audit event and changes
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let mut new_state: State = state.clone();
    let mut changes: Vec<Change> = Vec::new();
    let name: &'static str = command.name();

    let details: String = match command {
        Command::SubmitMatch {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => submit_match(
            &mut new_state,
            &entrant_a,
            &entrant_b,
            score_a,
            score_b,
            &mut changes,
        )?,
        Command::EditMatch {
            index,
            score_a,
            score_b,
        } => edit_match(&mut new_state, index, score_a, score_b, &mut changes)?,
        Command::RemoveMatch { index } => remove_match(&mut new_state, index, &mut changes)?,
        Command::SubmitTieBreaker {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => record_tie_breaker(
            &mut new_state,
            &entrant_a,
            &entrant_b,
            score_a,
            score_b,
            false,
            &mut changes,
        )?,
        Command::EditTieBreaker {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        } => record_tie_breaker(
            &mut new_state,
            &entrant_a,
            &entrant_b,
            score_a,
            score_b,
            true,
            &mut changes,
        )?,
        Command::SubmitKnockout {
            round,
            slot,
            score_a,
            score_b,
        } => record_knockout(
            &mut new_state,
            round,
            slot,
            score_a,
            score_b,
            false,
            &mut changes,
        )?,
        Command::EditKnockout {
            round,
            slot,
            score_a,
            score_b,
        } => record_knockout(
            &mut new_state,
            round,
            slot,
            score_a,
            score_b,
            true,
            &mut changes,
        )?,
        Command::ResetTournament { confirmed } => {
            if !confirmed {
                return Err(CoreError::DomainViolation(DomainError::ResetNotConfirmed));
            }
            new_state = State::new(state.config.clone());
            changes.push(Change::TournamentReset);
            String::from("Reset to initial state")
        }
    };

    progress(&mut new_state, &mut changes)?;

    new_state.phase = derive_phase(&new_state);
    if new_state.phase != state.phase {
        info!(
            tournament = %new_state.config.name,
            from = %state.phase,
            to = %new_state.phase,
            "Phase changed"
        );
        changes.push(Change::PhaseChanged {
            from: state.phase,
            to: new_state.phase,
        });
    }

    let audit_event: AuditEvent = AuditEvent::new(
        new_state.config.name.clone(),
        actor,
        cause,
        Action::new(String::from(name), Some(details)),
        state.to_snapshot(),
        new_state.to_snapshot(),
    );

    Ok(TransitionResult {
        new_state,
        audit_event,
        changes,
    })
}

fn describe(record: &MatchRecord) -> String {
    format!(
        "{} {}-{} {}",
        record.entrant_a, record.score_a, record.score_b, record.entrant_b
    )
}

fn submit_match(
    state: &mut State,
    entrant_a: &str,
    entrant_b: &str,
    score_a: u32,
    score_b: u32,
    changes: &mut Vec<Change>,
) -> Result<String, CoreError> {
    let a: Entrant = state.config.resolve(entrant_a)?;
    let b: Entrant = state.config.resolve(entrant_b)?;

    let record: MatchRecord = state.ledger.submit(&state.config, a, b, score_a, score_b)?;
    state.stats.apply_result(&record)?;
    debug!(result = %describe(&record), "Match recorded");

    changes.push(Change::MatchRecorded {
        index: state.ledger.len() - 1,
        record: record.clone(),
    });
    invalidate(state, changes);
    Ok(describe(&record))
}

fn edit_match(
    state: &mut State,
    index: usize,
    score_a: u32,
    score_b: u32,
    changes: &mut Vec<Change>,
) -> Result<String, CoreError> {
    let (old, new) = state.ledger.edit(index, score_a, score_b)?;
    state.stats.apply_edit(&old, &new)?;
    debug!(index, old = %describe(&old), new = %describe(&new), "Match edited");

    let details: String = format!("#{index}: {} -> {}", describe(&old), describe(&new));
    changes.push(Change::MatchEdited { index, old, new });
    invalidate(state, changes);
    Ok(details)
}

fn remove_match(
    state: &mut State,
    index: usize,
    changes: &mut Vec<Change>,
) -> Result<String, CoreError> {
    let record: MatchRecord = state.ledger.remove(index)?;
    state.stats.revert_result(&record)?;
    debug!(index, result = %describe(&record), "Match removed");

    let details: String = format!("#{index}: {}", describe(&record));
    changes.push(Change::MatchRemoved { index, record });
    invalidate(state, changes);
    Ok(details)
}

fn record_tie_breaker(
    state: &mut State,
    entrant_a: &str,
    entrant_b: &str,
    score_a: u32,
    score_b: u32,
    is_edit: bool,
    changes: &mut Vec<Change>,
) -> Result<String, CoreError> {
    if state.tie_breakers.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::WrongPhase {
            operation: String::from("record a tie-breaker"),
            phase: state.phase,
        }));
    }

    let a: Entrant = state.config.resolve(entrant_a)?;
    let b: Entrant = state.config.resolve(entrant_b)?;

    let group: &mut TieBreakerGroup = state
        .tie_breakers
        .iter_mut()
        .find(|group| group.schedules(&a, &b))
        .ok_or_else(|| DomainError::TieBreakerMatchNotFound {
            entrant_a: a.name().to_string(),
            entrant_b: b.name().to_string(),
        })?;

    let resolved: bool = if is_edit {
        group.edit(&a, &b, score_a, score_b)?
    } else {
        group.submit(&a, &b, score_a, score_b)?
    };

    let key: PairKey = PairKey::new(&a, &b);
    let record: Option<MatchRecord> = group
        .matches
        .iter()
        .find(|m| m.key() == key)
        .and_then(|m| m.result.clone());
    if let Some(record) = &record {
        debug!(result = %describe(record), "Tie-breaker recorded");
        changes.push(Change::TieBreakerRecorded {
            record: record.clone(),
        });
    }
    if resolved {
        note_resolution(group, changes);
    }

    if is_edit {
        discard_bracket(state, changes);
    }
    apply_marks(state)?;

    Ok(record
        .as_ref()
        .map_or_else(|| format!("{a} vs {b}"), describe))
}

fn record_knockout(
    state: &mut State,
    round: KnockoutRound,
    slot: usize,
    score_a: u32,
    score_b: u32,
    is_edit: bool,
    changes: &mut Vec<Change>,
) -> Result<String, CoreError> {
    let phase: TournamentPhase = state.phase;
    let bracket: &mut Bracket = state.bracket.as_mut().ok_or_else(|| {
        DomainError::WrongPhase {
            operation: String::from("record a knockout result"),
            phase,
        }
    })?;

    let was_complete: bool = bracket.podium().is_some();
    let bracket_changes: Vec<BracketChange> = if is_edit {
        bracket.edit(round, slot, score_a, score_b)?
    } else {
        bracket.submit(round, slot, score_a, score_b)?
    };

    let recorded: Option<(Entrant, Entrant, Option<Entrant>)> = bracket
        .slots(round)
        .get(slot)
        .map(|s| (s.entrant_a.clone(), s.entrant_b.clone(), s.winner().cloned()));
    let details: String = match recorded {
        Some((a, b, Some(winner))) => {
            debug!(%round, slot, %winner, "Knockout result recorded");
            changes.push(Change::KnockoutRecorded {
                round,
                slot,
                winner,
            });
            format!("{round} #{slot}: {a} {score_a}-{score_b} {b}")
        }
        _ => format!("{round} #{slot}: {score_a}-{score_b}"),
    };

    for change in bracket_changes {
        match change {
            BracketChange::Seeded(seeded) => {
                info!(round = %seeded, "Knockout round seeded");
                changes.push(Change::StageSeeded(seeded));
            }
            BracketChange::Cleared(cleared) => {
                info!(round = %cleared, "Knockout round cleared");
                changes.push(Change::StageCleared(cleared));
            }
        }
    }

    if let Some(podium) = bracket.podium().filter(|_| !was_complete) {
        info!(
            champion = %podium.champion,
            runner_up = %podium.runner_up,
            third = %podium.third,
            "Tournament complete"
        );
        changes.push(Change::TournamentCompleted(podium));
    }

    Ok(details)
}

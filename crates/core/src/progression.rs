// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Automatic progression between tournament stages.
//!
//! After every command the progression pass moves the tournament forward as
//! far as the recorded results allow: a complete ledger triggers tie
//! detection, and once every material tie is resolved the bracket is seeded.
//! Invalidation runs the other way and is explicit: any group-stage change
//! discards tie-breakers and the bracket before progression runs again.

use tracing::{debug, info, warn};

use tourney_domain::{
    Bracket, Entrant, KnockoutRound, Qualifiers, StandingsRow, TieBreakerGroup, TieGroup,
    TieResolution, TournamentPhase, detect_material_ties, rank, top,
};

use crate::error::CoreError;
use crate::state::{Change, State};

/// Discards every result derived from the group-stage standings.
pub(crate) fn invalidate(state: &mut State, changes: &mut Vec<Change>) {
    if !state.tie_breakers.is_empty() || state.stats.has_tie_breakers() {
        state.tie_breakers.clear();
        state.stats.clear_tie_breakers();
        debug!("Tie-breakers cleared");
        changes.push(Change::TieBreakersCleared);
    }
    discard_bracket(state, changes);
}

/// Discards the bracket, if one has been seeded.
pub(crate) fn discard_bracket(state: &mut State, changes: &mut Vec<Change>) {
    if state.bracket.take().is_some() {
        info!(tournament = %state.config.name, "Bracket discarded");
        changes.push(Change::BracketDiscarded);
    }
}

/// Re-applies the marks of every resolved tie group to the stats table.
///
/// # Errors
///
/// Returns an error if a group references an unregistered entrant.
pub(crate) fn apply_marks(state: &mut State) -> Result<(), CoreError> {
    state.stats.clear_tie_breakers();
    for group in &state.tie_breakers {
        for (entrant, mark) in group.marks() {
            state.stats.mark_tie_breaker(&entrant, mark)?;
        }
    }
    Ok(())
}

/// Records that a tie group has been resolved.
pub(crate) fn note_resolution(group: &TieBreakerGroup, changes: &mut Vec<Change>) {
    let Some(resolution) = &group.resolution else {
        return;
    };
    match resolution {
        TieResolution::Fallback { residual } => {
            let names: Vec<&str> = residual.iter().map(Entrant::name).collect();
            warn!(
                range_start = group.group.range_start,
                range_end = group.group.range_end,
                residual = ?names,
                "Tie-breakers left entrants level; standings order decides"
            );
        }
        TieResolution::HeadToHead | TieResolution::Playoff => {
            info!(
                range_start = group.group.range_start,
                range_end = group.group.range_end,
                ?resolution,
                "Tie group resolved"
            );
        }
    }
    changes.push(Change::TieGroupResolved {
        group: group.group.clone(),
        resolution: resolution.clone(),
    });
}

/// Moves the tournament forward as far as the recorded results allow.
///
/// # Errors
///
/// Returns an error if seeding or marking fails. Neither can happen for a
/// state built through `apply`.
pub(crate) fn progress(state: &mut State, changes: &mut Vec<Change>) -> Result<(), CoreError> {
    if state.bracket.is_some() || !state.ledger.is_complete(&state.config) {
        return Ok(());
    }

    if state.tie_breakers.is_empty() {
        open_tie_groups(state, changes)?;
    }

    if state.tie_breakers.iter().all(TieBreakerGroup::is_resolved) {
        seed_bracket(state, changes)?;
    }

    Ok(())
}

fn open_tie_groups(state: &mut State, changes: &mut Vec<Change>) -> Result<(), CoreError> {
    let ranked: Vec<StandingsRow> = rank(&state.stats);
    let groups: Vec<TieGroup> = detect_material_ties(
        &ranked,
        state.config.qualifiers.count(),
        state.config.tie_policy,
    );

    for group in groups {
        let breaker: TieBreakerGroup = TieBreakerGroup::open(group, &state.ledger);
        info!(
            range_start = breaker.group.range_start,
            range_end = breaker.group.range_end,
            teams = breaker.group.teams.len(),
            matches = breaker.matches.len(),
            "Material tie detected"
        );
        changes.push(Change::TieGroupOpened {
            group: breaker.group.clone(),
            matches: breaker.matches.len(),
        });
        note_resolution(&breaker, changes);
        state.tie_breakers.push(breaker);
    }

    apply_marks(state)
}

fn seed_bracket(state: &mut State, changes: &mut Vec<Change>) -> Result<(), CoreError> {
    let qualifiers: Qualifiers = state.config.qualifiers;
    let seeds: Vec<Entrant> = top(&rank(&state.stats), qualifiers.count());
    let bracket: Bracket = Bracket::seed(&seeds, qualifiers)?;

    let first_round: KnockoutRound = match qualifiers {
        Qualifiers::Eight => KnockoutRound::Quarterfinal,
        Qualifiers::Four => KnockoutRound::Semifinal,
    };
    info!(
        tournament = %state.config.name,
        round = %first_round,
        seeds = ?seeds.iter().map(Entrant::name).collect::<Vec<&str>>(),
        "Bracket seeded"
    );

    state.bracket = Some(bracket);
    changes.push(Change::StageSeeded(first_round));
    Ok(())
}

/// Derives the phase from the ledger, tie-breakers and bracket.
#[must_use]
pub(crate) fn derive_phase(state: &State) -> TournamentPhase {
    if let Some(bracket) = &state.bracket {
        return bracket.phase();
    }
    if state.ledger.is_complete(&state.config) && !state.tie_breakers.is_empty() {
        return TournamentPhase::TieBreaking;
    }
    TournamentPhase::League
}

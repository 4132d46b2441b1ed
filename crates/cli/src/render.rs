// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text and CSV rendering of tournament views.
//!
//! Every function returns a `String` so the output can be tested without
//! capturing stdout. Match indices and knockout slots are shown 1-based.

use std::fmt::Write as _;

use color_eyre::{Result, eyre::eyre};
use serde::Serialize;
use tourney::{Change, GroupProgress, MatchList, PendingTieBreaker, RoundView, State};
use tourney_audit::AuditEvent;
use tourney_domain::{Entrant, KnockoutSlot, Podium, StandingsRow, TieBreakMethod};
use tourney_persistence::TournamentSummary;

const fn method_label(method: TieBreakMethod) -> &'static str {
    match method {
        TieBreakMethod::HeadToHead => "h2h",
        TieBreakMethod::Playoff => "playoff",
        TieBreakMethod::Fallback => "order",
    }
}

/// Renders the standings table. A rule is drawn under the last qualifier.
#[must_use]
pub fn standings_table(rows: &[StandingsRow], cutoff: usize) -> String {
    let width: usize = rows
        .iter()
        .map(|row| row.entrant.name().len())
        .max()
        .unwrap_or(0)
        .max("Entrant".len());

    let mut out: String = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<width$}  {:>2}  {:>2}  {:>4}  {:>2}  TB",
        "Pos", "Entrant", "W", "L", "Pts", "GP"
    );
    for row in rows {
        let tie_breaker: String = row.stats.tie_breaker.map_or_else(String::new, |mark| {
            format!(
                "{} ({}w {}p)",
                method_label(mark.method),
                mark.wins,
                mark.points
            )
        });
        let _ = writeln!(
            out,
            "{:>3}  {:<width$}  {:>2}  {:>2}  {:>4}  {:>2}  {}",
            row.position,
            row.entrant.name(),
            row.stats.wins,
            row.stats.losses,
            row.stats.total_points,
            row.stats.games_played,
            tie_breaker
        );
        if row.position == cutoff && rows.len() > cutoff {
            let _ = writeln!(out, "{}", "-".repeat(width + 27));
        }
    }
    out
}

#[derive(Serialize)]
struct StandingsCsvRow<'a> {
    position: usize,
    entrant: &'a str,
    wins: u32,
    losses: u32,
    points: u32,
    games_played: u32,
    tie_breaker: Option<&'static str>,
}

/// Renders the standings as CSV with a header row.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn standings_csv(rows: &[StandingsRow]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(StandingsCsvRow {
            position: row.position,
            entrant: row.entrant.name(),
            wins: row.stats.wins,
            losses: row.stats.losses,
            points: row.stats.total_points,
            games_played: row.stats.games_played,
            tie_breaker: row.stats.tie_breaker.map(|mark| method_label(mark.method)),
        })?;
    }
    let bytes: Vec<u8> = writer.into_inner().map_err(|e| eyre!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Renders played results and remaining fixtures.
#[must_use]
pub fn match_table(list: &MatchList) -> String {
    let mut out: String = String::new();
    let _ = writeln!(out, "Played ({})", list.played.len());
    for (index, record) in &list.played {
        let _ = writeln!(
            out,
            "  #{:<3} {} {}-{} {}",
            index + 1,
            record.entrant_a,
            record.score_a,
            record.score_b,
            record.entrant_b
        );
    }
    let _ = writeln!(out, "Remaining ({})", list.remaining.len());
    for (a, b) in &list.remaining {
        let _ = writeln!(out, "  {a} vs {b}");
    }
    out
}

#[derive(Serialize)]
struct MatchCsvRow<'a> {
    index: usize,
    entrant_a: &'a str,
    entrant_b: &'a str,
    score_a: u32,
    score_b: u32,
    winner: &'a str,
}

/// Renders played results as CSV with a header row.
///
/// # Errors
///
/// Returns an error if a row cannot be written.
pub fn matches_csv(list: &MatchList) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (index, record) in &list.played {
        writer.serialize(MatchCsvRow {
            index: index + 1,
            entrant_a: record.entrant_a.name(),
            entrant_b: record.entrant_b.name(),
            score_a: record.score_a,
            score_b: record.score_b,
            winner: record.winner().name(),
        })?;
    }
    let bytes: Vec<u8> = writer.into_inner().map_err(|e| eyre!(e.to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

fn slot_line(number: usize, slot: &KnockoutSlot) -> String {
    match slot.result {
        Some((a, b)) => format!(
            "  {number}. {} {a}-{b} {}",
            slot.entrant_a, slot.entrant_b
        ),
        None => format!("  {number}. {} vs {}", slot.entrant_a, slot.entrant_b),
    }
}

/// Renders every seeded knockout round, followed by the podium once known.
#[must_use]
pub fn bracket_text(rounds: &[RoundView], podium: Option<&Podium>) -> String {
    if rounds.is_empty() {
        return String::from("The bracket has not been seeded yet.\n");
    }

    let mut out: String = String::new();
    for round in rounds {
        let _ = writeln!(out, "{}", round.round);
        for (i, slot) in round.slots.iter().enumerate() {
            let _ = writeln!(out, "{}", slot_line(i + 1, slot));
        }
    }
    if let Some(podium) = podium {
        let _ = writeln!(out, "Champion:  {}", podium.champion);
        let _ = writeln!(out, "Runner-up: {}", podium.runner_up);
        let _ = writeln!(out, "Third:     {}", podium.third);
        let _ = writeln!(out, "Fourth:    {}", podium.fourth);
    }
    out
}

/// Renders the phase, group progress and any pending tie-breakers.
#[must_use]
pub fn status_text(state: &State) -> String {
    let GroupProgress { played, total } = state.group_progress();
    let mut out: String = String::new();
    let _ = writeln!(out, "Tournament: {}", state.name());
    let _ = writeln!(out, "Phase:      {}", state.phase);
    let _ = writeln!(out, "Group:      {played}/{total} matches");

    let pending: Vec<PendingTieBreaker> = state.pending_tie_breakers();
    if !pending.is_empty() {
        let _ = writeln!(out, "Tie-breakers pending:");
        for p in &pending {
            let _ = writeln!(
                out,
                "  positions {}-{}: {} vs {}",
                p.range_start, p.range_end, p.entrant_a, p.entrant_b
            );
        }
    }
    if let Some(podium) = state.podium() {
        let _ = writeln!(out, "Champion:   {}", podium.champion);
    }
    out
}

/// Describes one change for the operator.
#[must_use]
pub fn change_line(change: &Change) -> String {
    match change {
        Change::MatchRecorded { index, record } => format!(
            "Recorded #{}: {} {}-{} {}",
            index + 1,
            record.entrant_a,
            record.score_a,
            record.score_b,
            record.entrant_b
        ),
        Change::MatchEdited { index, new, .. } => format!(
            "Corrected #{}: {} {}-{} {}",
            index + 1,
            new.entrant_a,
            new.score_a,
            new.score_b,
            new.entrant_b
        ),
        Change::MatchRemoved { index, record } => format!(
            "Removed #{}: {} vs {}",
            index + 1,
            record.entrant_a,
            record.entrant_b
        ),
        Change::TieBreakersCleared => String::from("Tie-breakers cleared"),
        Change::BracketDiscarded => String::from("Bracket discarded"),
        Change::TieGroupOpened { group, matches } => {
            let names: Vec<&str> = group.teams.iter().map(Entrant::name).collect();
            format!(
                "Tie at positions {}-{} ({}): {matches} tie-breaker match(es) needed",
                group.range_start,
                group.range_end,
                names.join(", ")
            )
        }
        Change::TieBreakerRecorded { record } => format!(
            "Tie-breaker: {} {}-{} {}",
            record.entrant_a, record.score_a, record.score_b, record.entrant_b
        ),
        Change::TieGroupResolved { group, resolution } => format!(
            "Tie at positions {}-{} resolved ({resolution:?})",
            group.range_start, group.range_end
        ),
        Change::KnockoutRecorded {
            round,
            slot,
            winner,
        } => format!("{round} {}: {winner} advances", slot + 1),
        Change::StageSeeded(round) => format!("{round} seeded"),
        Change::StageCleared(round) => format!("{round} cleared"),
        Change::PhaseChanged { from, to } => format!("Phase: {from} -> {to}"),
        Change::TournamentCompleted(podium) => format!("Champion: {}", podium.champion),
        Change::TournamentReset => String::from("Tournament reset"),
    }
}

/// Renders an audit timeline, oldest first.
#[must_use]
pub fn history_text(timeline: &[(i64, AuditEvent)]) -> String {
    let mut out: String = String::new();
    for (id, event) in timeline {
        let _ = writeln!(
            out,
            "{id:>5}  {:<16}  {:<13} -> {:<13}  {}",
            event.action.name,
            event.before.phase.as_str(),
            event.after.phase.as_str(),
            event.action.details.as_deref().unwrap_or("")
        );
    }
    out
}

/// Renders the stored tournaments.
#[must_use]
pub fn tournament_list(tournaments: &[TournamentSummary]) -> String {
    if tournaments.is_empty() {
        return String::from("No tournaments stored.\n");
    }
    let mut out: String = String::new();
    for summary in tournaments {
        let _ = writeln!(
            out,
            "{}  {}  (saved {})",
            summary.tournament, summary.phase, summary.saved_at
        );
    }
    out
}

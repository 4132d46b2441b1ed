// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-entrant aggregate statistics.
//!
//! Statistics are maintained incrementally on every ledger mutation and can
//! always be recomputed from scratch with [`StatsTable::from_ledger`]. The
//! two must agree; tests hold them to it.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ledger::{MatchLedger, MatchRecord};
use crate::types::{Entrant, TournamentConfig};

/// How a tie-breaker rank was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakMethod {
    /// Decided by group-stage results between the tied entrants.
    HeadToHead,
    /// Decided by a round of tie-breaker matches.
    Playoff,
    /// Still tied after the tie-breaker round; registration order decided.
    Fallback,
}

/// Tie-breaker outcome attached to an entrant.
///
/// Tie-breaker wins and points are kept here and never added to the
/// primary group-stage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakerMark {
    /// Position within the tie group, 0 = best.
    pub rank: usize,
    /// Wins inside the tie group.
    pub wins: u32,
    /// Points scored inside the tie group.
    pub points: u32,
    /// How the rank was decided.
    pub method: TieBreakMethod,
}

/// Aggregate group-stage statistics for one entrant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamStats {
    /// Matches won.
    pub wins: u32,
    /// Matches lost.
    pub losses: u32,
    /// Points scored across all recorded group-stage matches.
    pub total_points: u32,
    /// Matches played.
    pub games_played: u32,
    /// Opponents faced, in the order the matches were recorded.
    pub opponents: Vec<Entrant>,
    /// Tie-breaker outcome, if this entrant's tie has been resolved.
    pub tie_breaker: Option<TieBreakerMark>,
}

impl TeamStats {
    /// Returns the primary sort key `(wins, total_points)`.
    #[must_use]
    pub const fn standing_key(&self) -> (u32, u32) {
        (self.wins, self.total_points)
    }

    /// Returns the tie-breaker rank, if one has been assigned.
    #[must_use]
    pub fn tie_breaker_rank(&self) -> Option<usize> {
        self.tie_breaker.map(|mark| mark.rank)
    }
}

/// Statistics for every registered entrant, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatsTable {
    rows: Vec<(Entrant, TeamStats)>,
}

impl StatsTable {
    /// Creates a table with every entrant at zero.
    #[must_use]
    pub fn new(config: &TournamentConfig) -> Self {
        Self {
            rows: config
                .entrants()
                .map(|e| (e.clone(), TeamStats::default()))
                .collect(),
        }
    }

    /// Recomputes the table from scratch by replaying every ledger record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if the ledger references an
    /// entrant that is not registered.
    pub fn from_ledger(config: &TournamentConfig, ledger: &MatchLedger) -> Result<Self, DomainError> {
        let mut table: Self = Self::new(config);
        for record in ledger.records() {
            table.apply_result(record)?;
        }
        Ok(table)
    }

    /// Returns every `(entrant, stats)` row in registration order.
    #[must_use]
    pub fn rows(&self) -> &[(Entrant, TeamStats)] {
        &self.rows
    }

    /// Returns the statistics for an entrant.
    #[must_use]
    pub fn get(&self, entrant: &Entrant) -> Option<&TeamStats> {
        self.rows.iter().find(|(e, _)| e == entrant).map(|(_, s)| s)
    }

    fn get_mut(&mut self, entrant: &Entrant) -> Result<&mut TeamStats, DomainError> {
        self.rows
            .iter_mut()
            .find(|(e, _)| e == entrant)
            .map(|(_, s)| s)
            .ok_or_else(|| DomainError::UnknownEntrant(entrant.name().to_string()))
    }

    /// Adds a record's contribution to both entrants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if either entrant is not registered.
    pub fn apply_result(&mut self, record: &MatchRecord) -> Result<(), DomainError> {
        // Resolve both sides first so a failure leaves the table untouched.
        self.get_mut(&record.entrant_a)?;
        self.get_mut(&record.entrant_b)?;

        let winner: Entrant = record.winner().clone();
        for (me, opponent, points) in [
            (&record.entrant_a, &record.entrant_b, record.score_a),
            (&record.entrant_b, &record.entrant_a, record.score_b),
        ] {
            let stats: &mut TeamStats = self.get_mut(me)?;
            stats.games_played += 1;
            stats.total_points += points;
            stats.opponents.push(opponent.clone());
            if *me == winner {
                stats.wins += 1;
            } else {
                stats.losses += 1;
            }
        }
        Ok(())
    }

    /// Adjusts both entrants after a record's scores changed.
    ///
    /// The old contribution is subtracted before the new one is added.
    /// Games played and opponents are unchanged because the pairing is the same.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if either entrant is not registered.
    pub fn apply_edit(&mut self, old: &MatchRecord, new: &MatchRecord) -> Result<(), DomainError> {
        self.get_mut(&old.entrant_a)?;
        self.get_mut(&old.entrant_b)?;

        for (me, old_points, new_points) in [
            (&old.entrant_a, old.score_a, new.score_a),
            (&old.entrant_b, old.score_b, new.score_b),
        ] {
            let stats: &mut TeamStats = self.get_mut(me)?;
            stats.total_points = stats.total_points - old_points + new_points;
            if old.winner() == me {
                stats.wins -= 1;
            } else {
                stats.losses -= 1;
            }
            if new.winner() == me {
                stats.wins += 1;
            } else {
                stats.losses += 1;
            }
        }
        Ok(())
    }

    /// Removes a record's full contribution from both entrants.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if either entrant is not registered.
    pub fn revert_result(&mut self, record: &MatchRecord) -> Result<(), DomainError> {
        self.get_mut(&record.entrant_a)?;
        self.get_mut(&record.entrant_b)?;

        for (me, opponent, points) in [
            (&record.entrant_a, &record.entrant_b, record.score_a),
            (&record.entrant_b, &record.entrant_a, record.score_b),
        ] {
            let stats: &mut TeamStats = self.get_mut(me)?;
            stats.games_played -= 1;
            stats.total_points -= points;
            if let Some(pos) = stats.opponents.iter().position(|o| o == opponent) {
                stats.opponents.remove(pos);
            }
            if record.winner() == me {
                stats.wins -= 1;
            } else {
                stats.losses -= 1;
            }
        }
        Ok(())
    }

    /// Attaches a tie-breaker outcome to an entrant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if the entrant is not registered.
    pub fn mark_tie_breaker(
        &mut self,
        entrant: &Entrant,
        mark: TieBreakerMark,
    ) -> Result<(), DomainError> {
        self.get_mut(entrant)?.tie_breaker = Some(mark);
        Ok(())
    }

    /// Removes every tie-breaker outcome.
    pub fn clear_tie_breakers(&mut self) {
        for (_, stats) in &mut self.rows {
            stats.tie_breaker = None;
        }
    }

    /// Returns whether any entrant carries a tie-breaker outcome.
    #[must_use]
    pub fn has_tie_breakers(&self) -> bool {
        self.rows.iter().any(|(_, s)| s.tie_breaker.is_some())
    }

    /// Returns the total games played across all entrants.
    #[must_use]
    pub fn total_games_played(&self) -> u32 {
        self.rows.iter().map(|(_, s)| s.games_played).sum()
    }
}

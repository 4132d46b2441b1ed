// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tie detection and resolution.
//!
//! A tie group is a maximal run of entrants with identical wins and points in
//! the ranked table. Only material groups (per [`TiePolicy`]) are resolved.
//!
//! Resolution is attempted in two steps:
//!
//! 1. **Head-to-head** — when every pair in the group has already met in the
//!    group stage, the intra-group results are aggregated. A strict order
//!    resolves the group without new matches.
//! 2. **Tie-breaker round** — otherwise one extra match is scheduled per pair.
//!    Results only feed the group aggregate, never the primary statistics.
//!    A residual tie after the round is broken by standings order and
//!    reported as [`TieResolution::Fallback`].

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ledger::{MatchLedger, MatchRecord, PairKey};
use crate::standings::StandingsRow;
use crate::stats::{TieBreakMethod, TieBreakerMark};
use crate::types::{Entrant, TiePolicy};
use crate::validation::validate_scores;

/// A run of entrants sharing identical `(wins, total_points)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieGroup {
    /// The tied entrants in standings order.
    pub teams: Vec<Entrant>,
    /// First 1-indexed position covered by the run.
    pub range_start: usize,
    /// Last 1-indexed position covered by the run.
    pub range_end: usize,
}

impl TieGroup {
    /// Returns whether the group contains the entrant.
    #[must_use]
    pub fn contains(&self, entrant: &Entrant) -> bool {
        self.teams.contains(entrant)
    }

    /// Returns every unordered pairing inside the group, in standings order.
    #[must_use]
    pub fn pairings(&self) -> Vec<(Entrant, Entrant)> {
        let mut pairings: Vec<(Entrant, Entrant)> = Vec::new();
        for (i, a) in self.teams.iter().enumerate() {
            for b in self.teams.iter().skip(i + 1) {
                pairings.push((a.clone(), b.clone()));
            }
        }
        pairings
    }
}

/// Returns whether a run at positions `[start, end]` is material.
#[must_use]
pub const fn is_material(start: usize, end: usize, cutoff: usize, policy: TiePolicy) -> bool {
    if end <= start {
        return false;
    }
    match policy {
        TiePolicy::StraddleCutoff => start <= cutoff && cutoff < end,
        TiePolicy::WithinMargin { margin } => start <= cutoff.saturating_add(margin),
    }
}

/// Finds every material tie group in a ranked table.
///
/// # Arguments
///
/// * `ranked` - The ranked standings
/// * `cutoff` - The last qualifying position (e.g. 8)
/// * `policy` - The material tie policy
#[must_use]
pub fn detect_material_ties(
    ranked: &[StandingsRow],
    cutoff: usize,
    policy: TiePolicy,
) -> Vec<TieGroup> {
    let mut groups: Vec<TieGroup> = Vec::new();
    let mut i: usize = 0;

    while i < ranked.len() {
        let key: (u32, u32) = ranked[i].stats.standing_key();
        let len: usize = ranked[i..]
            .iter()
            .take_while(|row| row.stats.standing_key() == key)
            .count();

        let range_start: usize = i + 1;
        let range_end: usize = i + len;
        if len > 1 && is_material(range_start, range_end, cutoff, policy) {
            groups.push(TieGroup {
                teams: ranked[i..i + len]
                    .iter()
                    .map(|row| row.entrant.clone())
                    .collect(),
                range_start,
                range_end,
            });
        }
        i += len;
    }

    groups
}

/// An entrant's aggregate inside a tie group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStanding {
    /// The entrant.
    pub entrant: Entrant,
    /// Wins against other group members.
    pub wins: u32,
    /// Points scored against other group members.
    pub points: u32,
}

/// Aggregates results between group members, ordered best first.
///
/// Returns the order and the entrants still level on `(wins, points)`.
fn order_group<'a>(
    teams: &[Entrant],
    records: impl Iterator<Item = &'a MatchRecord>,
) -> (Vec<GroupStanding>, Vec<Entrant>) {
    let mut standings: Vec<GroupStanding> = teams
        .iter()
        .map(|e| GroupStanding {
            entrant: e.clone(),
            wins: 0,
            points: 0,
        })
        .collect();

    for record in records {
        if !teams.contains(&record.entrant_a) || !teams.contains(&record.entrant_b) {
            continue;
        }
        let winner: &Entrant = record.winner();
        for standing in &mut standings {
            if let Some(points) = record.points_for(&standing.entrant) {
                standing.points += points;
                if &standing.entrant == winner {
                    standing.wins += 1;
                }
            }
        }
    }

    // Stable: level entrants keep standings order.
    standings.sort_by(|a, b| (b.wins, b.points).cmp(&(a.wins, a.points)));

    let mut residual: Vec<Entrant> = Vec::new();
    for pair in standings.windows(2) {
        if (pair[0].wins, pair[0].points) == (pair[1].wins, pair[1].points) {
            for standing in pair {
                if !residual.contains(&standing.entrant) {
                    residual.push(standing.entrant.clone());
                }
            }
        }
    }

    (standings, residual)
}

/// Outcome of a head-to-head check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadToHead {
    /// At least one pair in the group never met in the group stage.
    Incomplete,
    /// Every pair met, but the intra-group results are still level.
    Inconclusive,
    /// Every pair met and the intra-group results give a strict order.
    Decided(Vec<GroupStanding>),
}

/// Attempts to order a tie group by group-stage results between its members.
#[must_use]
pub fn head_to_head(group: &TieGroup, ledger: &MatchLedger) -> HeadToHead {
    let complete: bool = group
        .pairings()
        .iter()
        .all(|(a, b)| ledger.contains_pair(a, b));
    if !complete {
        return HeadToHead::Incomplete;
    }

    let (order, residual) = order_group(&group.teams, ledger.records().iter());
    if residual.is_empty() {
        HeadToHead::Decided(order)
    } else {
        HeadToHead::Inconclusive
    }
}

/// A scheduled tie-breaker match and its result, if recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakerMatch {
    /// The first entrant (higher in the standings).
    pub entrant_a: Entrant,
    /// The second entrant.
    pub entrant_b: Entrant,
    /// The recorded result.
    pub result: Option<MatchRecord>,
}

impl TieBreakerMatch {
    /// Returns the pairing key.
    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.entrant_a, &self.entrant_b)
    }
}

/// How a tie group was finally resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieResolution {
    /// Group-stage results between the members gave a strict order.
    HeadToHead,
    /// The tie-breaker round gave a strict order.
    Playoff,
    /// The tie-breaker round left entrants level; standings order decided them.
    Fallback {
        /// The entrants that were still level.
        residual: Vec<Entrant>,
    },
}

/// A material tie group and its resolution progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakerGroup {
    /// The tie group as detected.
    pub group: TieGroup,
    /// Tie-breaker matches. Empty when head-to-head decided the group.
    pub matches: Vec<TieBreakerMatch>,
    /// The final order, best first, once resolved.
    pub order: Vec<GroupStanding>,
    /// How the group was resolved, if it has been.
    pub resolution: Option<TieResolution>,
}

impl TieBreakerGroup {
    /// Opens resolution for a tie group.
    ///
    /// Head-to-head is tried first. If it cannot decide the group, one
    /// tie-breaker match is scheduled for every pair.
    #[must_use]
    pub fn open(group: TieGroup, ledger: &MatchLedger) -> Self {
        match head_to_head(&group, ledger) {
            HeadToHead::Decided(order) => Self {
                group,
                matches: Vec::new(),
                order,
                resolution: Some(TieResolution::HeadToHead),
            },
            HeadToHead::Incomplete | HeadToHead::Inconclusive => {
                let matches: Vec<TieBreakerMatch> = group
                    .pairings()
                    .into_iter()
                    .map(|(entrant_a, entrant_b)| TieBreakerMatch {
                        entrant_a,
                        entrant_b,
                        result: None,
                    })
                    .collect();
                Self {
                    group,
                    matches,
                    order: Vec::new(),
                    resolution: None,
                }
            }
        }
    }

    /// Returns whether the group has been resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolution.is_some()
    }

    /// Returns the tie-breaker matches still awaiting a result.
    #[must_use]
    pub fn pending_matches(&self) -> Vec<&TieBreakerMatch> {
        self.matches.iter().filter(|m| m.result.is_none()).collect()
    }

    /// Returns whether this group schedules a match between the two entrants.
    #[must_use]
    pub fn schedules(&self, a: &Entrant, b: &Entrant) -> bool {
        let key: PairKey = PairKey::new(a, b);
        self.matches.iter().any(|m| m.key() == key)
    }

    fn find_match_mut(
        &mut self,
        a: &Entrant,
        b: &Entrant,
    ) -> Result<&mut TieBreakerMatch, DomainError> {
        let key: PairKey = PairKey::new(a, b);
        self.matches
            .iter_mut()
            .find(|m| m.key() == key)
            .ok_or_else(|| DomainError::TieBreakerMatchNotFound {
                entrant_a: a.name().to_string(),
                entrant_b: b.name().to_string(),
            })
    }

    /// Builds a record in the scheduled orientation from submitted scores.
    fn oriented_record(
        scheduled: &TieBreakerMatch,
        a: &Entrant,
        score_a: u32,
        score_b: u32,
    ) -> Result<MatchRecord, DomainError> {
        let (first, second) = if *a == scheduled.entrant_a {
            (score_a, score_b)
        } else {
            (score_b, score_a)
        };
        MatchRecord::new(
            scheduled.entrant_a.clone(),
            scheduled.entrant_b.clone(),
            first,
            second,
        )
    }

    /// Records a tie-breaker result.
    ///
    /// # Returns
    ///
    /// `true` if this result completed the round and resolved the group.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The group is already resolved
    /// - No match is scheduled between the entrants
    /// - The scores are equal
    /// - The match already has a result
    pub fn submit(
        &mut self,
        a: &Entrant,
        b: &Entrant,
        score_a: u32,
        score_b: u32,
    ) -> Result<bool, DomainError> {
        if self.is_resolved() {
            return Err(DomainError::TieGroupAlreadyResolved {
                range_start: self.group.range_start,
                range_end: self.group.range_end,
            });
        }
        validate_scores(a, b, score_a, score_b)?;

        let scheduled: &mut TieBreakerMatch = self.find_match_mut(a, b)?;
        if scheduled.result.is_some() {
            return Err(DomainError::DuplicateMatch {
                entrant_a: a.name().to_string(),
                entrant_b: b.name().to_string(),
            });
        }
        let record: MatchRecord = Self::oriented_record(scheduled, a, score_a, score_b)?;
        scheduled.result = Some(record);

        Ok(self.try_resolve())
    }

    /// Replaces a recorded tie-breaker result and re-resolves the group.
    ///
    /// # Errors
    ///
    /// Returns an error if no match is scheduled between the entrants, the
    /// match has no result yet, or the scores are equal.
    pub fn edit(
        &mut self,
        a: &Entrant,
        b: &Entrant,
        score_a: u32,
        score_b: u32,
    ) -> Result<bool, DomainError> {
        validate_scores(a, b, score_a, score_b)?;

        let scheduled: &mut TieBreakerMatch = self.find_match_mut(a, b)?;
        if scheduled.result.is_none() {
            return Err(DomainError::validation(
                "tie_breaker",
                format!("{a} vs {b} has no result to edit"),
            ));
        }
        let record: MatchRecord = Self::oriented_record(scheduled, a, score_a, score_b)?;
        scheduled.result = Some(record);

        self.resolution = None;
        self.order.clear();
        Ok(self.try_resolve())
    }

    /// Resolves the group once every tie-breaker match has a result.
    fn try_resolve(&mut self) -> bool {
        if self.matches.iter().any(|m| m.result.is_none()) {
            return false;
        }

        let (order, residual) = order_group(
            &self.group.teams,
            self.matches.iter().filter_map(|m| m.result.as_ref()),
        );
        self.order = order;
        self.resolution = Some(if residual.is_empty() {
            TieResolution::Playoff
        } else {
            TieResolution::Fallback { residual }
        });
        true
    }

    /// Returns the tie-breaker marks for every member, once resolved.
    #[must_use]
    pub fn marks(&self) -> Vec<(Entrant, TieBreakerMark)> {
        let Some(resolution) = &self.resolution else {
            return Vec::new();
        };

        self.order
            .iter()
            .enumerate()
            .map(|(rank, standing)| {
                let method: TieBreakMethod = match resolution {
                    TieResolution::HeadToHead => TieBreakMethod::HeadToHead,
                    TieResolution::Playoff => TieBreakMethod::Playoff,
                    TieResolution::Fallback { residual } => {
                        if residual.contains(&standing.entrant) {
                            TieBreakMethod::Fallback
                        } else {
                            TieBreakMethod::Playoff
                        }
                    }
                };
                (
                    standing.entrant.clone(),
                    TieBreakerMark {
                        rank,
                        wins: standing.wins,
                        points: standing.points,
                        method,
                    },
                )
            })
            .collect()
    }
}

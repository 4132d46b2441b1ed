// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only views over the tournament state for renderers.

use tourney_domain::{
    Bracket, Entrant, KnockoutRound, KnockoutSlot, MatchRecord, Podium, StandingsRow, rank,
};

use crate::state::State;

/// Played and remaining group-stage fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchList {
    /// Recorded results with their ledger index, in submission order.
    pub played: Vec<(usize, MatchRecord)>,
    /// Scheduled pairings without a result, in schedule order.
    pub remaining: Vec<(Entrant, Entrant)>,
}

/// A tie-breaker match still awaiting a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTieBreaker {
    /// First standings position of the tie group.
    pub range_start: usize,
    /// Last standings position of the tie group.
    pub range_end: usize,
    /// The first entrant.
    pub entrant_a: Entrant,
    /// The second entrant.
    pub entrant_b: Entrant,
}

/// One seeded knockout round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundView {
    /// The round.
    pub round: KnockoutRound,
    /// The round's slots in order.
    pub slots: Vec<KnockoutSlot>,
}

/// Group-stage progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupProgress {
    /// Matches recorded.
    pub played: usize,
    /// Matches scheduled.
    pub total: usize,
}

impl State {
    /// Returns the ranked standings table.
    #[must_use]
    pub fn standings(&self) -> Vec<StandingsRow> {
        rank(&self.stats)
    }

    /// Returns the played and remaining group-stage fixtures.
    #[must_use]
    pub fn match_list(&self) -> MatchList {
        MatchList {
            played: self.ledger.records().iter().cloned().enumerate().collect(),
            remaining: self.ledger.remaining_pairings(&self.config),
        }
    }

    /// Returns every tie-breaker match awaiting a result.
    #[must_use]
    pub fn pending_tie_breakers(&self) -> Vec<PendingTieBreaker> {
        self.tie_breakers
            .iter()
            .flat_map(|group| {
                group.pending_matches().into_iter().map(|m| PendingTieBreaker {
                    range_start: group.group.range_start,
                    range_end: group.group.range_end,
                    entrant_a: m.entrant_a.clone(),
                    entrant_b: m.entrant_b.clone(),
                })
            })
            .collect()
    }

    /// Returns every seeded knockout round in playing order.
    #[must_use]
    pub fn bracket_view(&self) -> Vec<RoundView> {
        let Some(bracket) = &self.bracket else {
            return Vec::new();
        };
        [
            KnockoutRound::Quarterfinal,
            KnockoutRound::Semifinal,
            KnockoutRound::ThirdPlace,
            KnockoutRound::Final,
        ]
        .into_iter()
        .filter(|round| !bracket.slots(*round).is_empty())
        .map(|round| RoundView {
            round,
            slots: bracket.slots(round).to_vec(),
        })
        .collect()
    }

    /// Returns the final placings once the tournament is complete.
    #[must_use]
    pub fn podium(&self) -> Option<Podium> {
        self.bracket.as_ref().and_then(Bracket::podium)
    }

    /// Returns how much of the group stage has been played.
    #[must_use]
    pub fn group_progress(&self) -> GroupProgress {
        GroupProgress {
            played: self.ledger.len(),
            total: self.config.scheduled_match_count(),
        }
    }
}

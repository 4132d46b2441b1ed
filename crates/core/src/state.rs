// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use tourney_audit::{AuditEvent, StateSnapshot};
use tourney_domain::{
    Bracket, Entrant, KnockoutRound, MatchLedger, MatchRecord, Podium, StatsTable,
    TieBreakerGroup, TieGroup, TieResolution, TournamentConfig, TournamentPhase,
};

/// The complete state of one tournament.
///
/// Every field except `config` is derived from the commands applied so far.
/// The whole value is serialized as the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// The fixed configuration.
    pub config: TournamentConfig,
    /// Group-stage results in submission order.
    pub ledger: MatchLedger,
    /// Per-entrant statistics derived from the ledger.
    pub stats: StatsTable,
    /// Material tie groups detected at group-stage completion.
    pub tie_breakers: Vec<TieBreakerGroup>,
    /// The knockout bracket, once seeded.
    pub bracket: Option<Bracket>,
    /// The current phase.
    pub phase: TournamentPhase,
}

impl State {
    /// Creates a fresh state with every entrant at zero.
    #[must_use]
    pub fn new(config: TournamentConfig) -> Self {
        let stats: StatsTable = StatsTable::new(&config);
        Self {
            config,
            ledger: MatchLedger::new(),
            stats,
            tie_breakers: Vec::new(),
            bracket: None,
            phase: TournamentPhase::League,
        }
    }

    /// Returns the tournament name, which is also its snapshot key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let resolved: usize = self
            .tie_breakers
            .iter()
            .filter(|group| group.is_resolved())
            .count();
        StateSnapshot::new(
            self.phase,
            format!(
                "matches={}/{},tie_groups={}/{},bracket={}",
                self.ledger.len(),
                self.config.scheduled_match_count(),
                resolved,
                self.tie_breakers.len(),
                self.bracket.is_some()
            ),
        )
    }
}

/// One observable consequence of a transition.
///
/// A transition returns every change it made, in the order it made them,
/// so renderers can react without diffing states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A group-stage result was appended.
    MatchRecorded {
        /// Ledger index of the new record.
        index: usize,
        /// The new record.
        record: MatchRecord,
    },
    /// A group-stage result was replaced.
    MatchEdited {
        /// Ledger index of the record.
        index: usize,
        /// The record before the edit.
        old: MatchRecord,
        /// The record after the edit.
        new: MatchRecord,
    },
    /// A group-stage result was deleted.
    MatchRemoved {
        /// Ledger index the record was removed from.
        index: usize,
        /// The removed record.
        record: MatchRecord,
    },
    /// Every tie group and tie-breaker mark was discarded.
    TieBreakersCleared,
    /// The knockout bracket was discarded.
    BracketDiscarded,
    /// A material tie group was detected.
    TieGroupOpened {
        /// The tied entrants and their positions.
        group: TieGroup,
        /// Number of tie-breaker matches scheduled. Zero if head-to-head decided.
        matches: usize,
    },
    /// A tie-breaker result was recorded or replaced.
    TieBreakerRecorded {
        /// The result, in scheduled orientation.
        record: MatchRecord,
    },
    /// A tie group received its final order.
    TieGroupResolved {
        /// The group.
        group: TieGroup,
        /// How it was resolved.
        resolution: TieResolution,
    },
    /// A knockout result was recorded or replaced.
    KnockoutRecorded {
        /// The round.
        round: KnockoutRound,
        /// The slot.
        slot: usize,
        /// The winner.
        winner: Entrant,
    },
    /// A knockout round was seeded.
    StageSeeded(KnockoutRound),
    /// A knockout round was cleared by an earlier edit.
    StageCleared(KnockoutRound),
    /// The phase moved.
    PhaseChanged {
        /// The previous phase.
        from: TournamentPhase,
        /// The new phase.
        to: TournamentPhase,
    },
    /// The final and third-place match are both recorded.
    TournamentCompleted(Podium),
    /// The tournament was reset to its initial state.
    TournamentReset,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// Every change the transition made, in order.
    pub changes: Vec<Change>,
}

impl TransitionResult {
    /// Returns whether the transition was a reset.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        self.changes.contains(&Change::TournamentReset)
    }
}

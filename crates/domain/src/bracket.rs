// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Knockout bracket state machine.
//!
//! Results flow forward: a stage is seeded only once every match of the
//! previous stage has a result. Edits flow backward: editing a result clears
//! every stage strictly after it, then re-seeds the next stage if the edited
//! stage is still complete.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::types::{Entrant, Qualifiers, TournamentPhase};
use crate::validation::validate_scores;

/// A knockout round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnockoutRound {
    /// Quarterfinals (eight qualifiers only).
    Quarterfinal,
    /// Semifinals.
    Semifinal,
    /// Match between the semifinal losers.
    ThirdPlace,
    /// Match between the semifinal winners.
    Final,
}

impl KnockoutRound {
    /// Converts this round to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Quarterfinal => "quarterfinal",
            Self::Semifinal => "semifinal",
            Self::ThirdPlace => "third_place",
            Self::Final => "final",
        }
    }

    /// Returns the stage index. Third place and final share the last stage.
    const fn stage(self) -> u8 {
        match self {
            Self::Quarterfinal => 0,
            Self::Semifinal => 1,
            Self::ThirdPlace | Self::Final => 2,
        }
    }
}

impl FromStr for KnockoutRound {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarterfinal" | "qf" => Ok(Self::Quarterfinal),
            "semifinal" | "sf" => Ok(Self::Semifinal),
            "third_place" | "third" => Ok(Self::ThirdPlace),
            "final" => Ok(Self::Final),
            _ => Err(DomainError::validation(
                "round",
                format!("'{s}' is not a knockout round"),
            )),
        }
    }
}

impl std::fmt::Display for KnockoutRound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quarterfinal => write!(f, "Quarterfinal"),
            Self::Semifinal => write!(f, "Semifinal"),
            Self::ThirdPlace => write!(f, "Third place"),
            Self::Final => write!(f, "Final"),
        }
    }
}

/// One knockout pairing and its result, if recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutSlot {
    /// The first entrant (the higher seed where seeding applies).
    pub entrant_a: Entrant,
    /// The second entrant.
    pub entrant_b: Entrant,
    /// `(score_a, score_b)` once recorded.
    pub result: Option<(u32, u32)>,
}

impl KnockoutSlot {
    const fn pending(entrant_a: Entrant, entrant_b: Entrant) -> Self {
        Self {
            entrant_a,
            entrant_b,
            result: None,
        }
    }

    /// Returns the winner, if a result has been recorded.
    #[must_use]
    pub const fn winner(&self) -> Option<&Entrant> {
        match self.result {
            Some((a, b)) if a > b => Some(&self.entrant_a),
            Some(_) => Some(&self.entrant_b),
            None => None,
        }
    }

    /// Returns the loser, if a result has been recorded.
    #[must_use]
    pub const fn loser(&self) -> Option<&Entrant> {
        match self.result {
            Some((a, b)) if a > b => Some(&self.entrant_b),
            Some(_) => Some(&self.entrant_a),
            None => None,
        }
    }

    /// Returns whether a result has been recorded.
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        self.result.is_some()
    }
}

/// Final placings once the bracket is complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podium {
    /// Winner of the final.
    pub champion: Entrant,
    /// Loser of the final.
    pub runner_up: Entrant,
    /// Winner of the third-place match.
    pub third: Entrant,
    /// Loser of the third-place match.
    pub fourth: Entrant,
}

/// A structural change made to the bracket by a submit or edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketChange {
    /// A round was seeded with new pairings.
    Seeded(KnockoutRound),
    /// A previously seeded round was cleared.
    Cleared(KnockoutRound),
}

/// The knockout bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    qualifiers: Qualifiers,
    seeds: Vec<Entrant>,
    quarterfinals: Vec<KnockoutSlot>,
    semifinals: Vec<KnockoutSlot>,
    third_place: Option<KnockoutSlot>,
    final_match: Option<KnockoutSlot>,
}

impl Bracket {
    /// Seeds a new bracket from ranked entrants.
    ///
    /// # Arguments
    ///
    /// * `ranked` - Entrants in final standings order; at least as many as
    ///   the bracket needs. Extra entrants are ignored.
    /// * `qualifiers` - The bracket size
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteSeeding` if too few entrants are given
    /// or an entrant appears twice.
    pub fn seed(ranked: &[Entrant], qualifiers: Qualifiers) -> Result<Self, DomainError> {
        let count: usize = qualifiers.count();
        let first_stage: KnockoutRound = match qualifiers {
            Qualifiers::Eight => KnockoutRound::Quarterfinal,
            Qualifiers::Four => KnockoutRound::Semifinal,
        };

        if ranked.len() < count {
            return Err(DomainError::IncompleteSeeding {
                stage: first_stage.to_string(),
                reason: format!("{count} entrants needed, {} available", ranked.len()),
            });
        }
        let seeds: Vec<Entrant> = ranked[..count].to_vec();
        for (i, seed) in seeds.iter().enumerate() {
            if seeds[..i].contains(seed) {
                return Err(DomainError::IncompleteSeeding {
                    stage: first_stage.to_string(),
                    reason: format!("'{seed}' is seeded more than once"),
                });
            }
        }

        // Seed n meets seed (count + 1 - n).
        let pairings: Vec<KnockoutSlot> = (0..count / 2)
            .map(|i| KnockoutSlot::pending(seeds[i].clone(), seeds[count - 1 - i].clone()))
            .collect();

        let (quarterfinals, semifinals) = match qualifiers {
            Qualifiers::Eight => (pairings, Vec::new()),
            Qualifiers::Four => (Vec::new(), pairings),
        };

        Ok(Self {
            qualifiers,
            seeds,
            quarterfinals,
            semifinals,
            third_place: None,
            final_match: None,
        })
    }

    /// Returns the bracket size.
    #[must_use]
    pub const fn qualifiers(&self) -> Qualifiers {
        self.qualifiers
    }

    /// Returns the seeded entrants, best first.
    #[must_use]
    pub fn seeds(&self) -> &[Entrant] {
        &self.seeds
    }

    /// Returns the slots of a round. Empty until the round is seeded.
    #[must_use]
    pub fn slots(&self, round: KnockoutRound) -> &[KnockoutSlot] {
        match round {
            KnockoutRound::Quarterfinal => &self.quarterfinals,
            KnockoutRound::Semifinal => &self.semifinals,
            KnockoutRound::ThirdPlace => self.third_place.as_slice(),
            KnockoutRound::Final => self.final_match.as_slice(),
        }
    }

    fn slots_mut(&mut self, round: KnockoutRound) -> &mut [KnockoutSlot] {
        match round {
            KnockoutRound::Quarterfinal => &mut self.quarterfinals,
            KnockoutRound::Semifinal => &mut self.semifinals,
            KnockoutRound::ThirdPlace => self.third_place.as_mut_slice(),
            KnockoutRound::Final => self.final_match.as_mut_slice(),
        }
    }

    fn slot_mut(
        &mut self,
        round: KnockoutRound,
        slot: usize,
    ) -> Result<&mut KnockoutSlot, DomainError> {
        let slots: &mut [KnockoutSlot] = self.slots_mut(round);
        if slots.is_empty() {
            return Err(DomainError::StageNotReady { round });
        }
        slots
            .get_mut(slot)
            .ok_or(DomainError::KnockoutSlotNotFound { round, slot })
    }

    fn round_complete(&self, round: KnockoutRound) -> bool {
        let slots: &[KnockoutSlot] = self.slots(round);
        !slots.is_empty() && slots.iter().all(KnockoutSlot::is_recorded)
    }

    /// Records a knockout result and seeds the next stage when possible.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The round has not been seeded
    /// - The slot does not exist
    /// - The slot already has a result
    /// - The scores are equal
    pub fn submit(
        &mut self,
        round: KnockoutRound,
        slot: usize,
        score_a: u32,
        score_b: u32,
    ) -> Result<Vec<BracketChange>, DomainError> {
        let target: &mut KnockoutSlot = self.slot_mut(round, slot)?;
        if target.is_recorded() {
            return Err(DomainError::KnockoutAlreadyRecorded { round, slot });
        }
        validate_scores(&target.entrant_a, &target.entrant_b, score_a, score_b)?;
        target.result = Some((score_a, score_b));

        Ok(self.advance())
    }

    /// Replaces a recorded knockout result.
    ///
    /// Every stage strictly after the edited one is cleared, then the next
    /// stage is re-seeded if the edited stage is still complete.
    ///
    /// # Errors
    ///
    /// Returns an error if the round has not been seeded, the slot does not
    /// exist, the slot has no result yet, or the scores are equal.
    pub fn edit(
        &mut self,
        round: KnockoutRound,
        slot: usize,
        score_a: u32,
        score_b: u32,
    ) -> Result<Vec<BracketChange>, DomainError> {
        let target: &mut KnockoutSlot = self.slot_mut(round, slot)?;
        if !target.is_recorded() {
            return Err(DomainError::KnockoutNotRecorded { round, slot });
        }
        validate_scores(&target.entrant_a, &target.entrant_b, score_a, score_b)?;
        target.result = Some((score_a, score_b));

        let mut changes: Vec<BracketChange> = self.clear_after(round);
        changes.extend(self.advance());
        Ok(changes)
    }

    fn clear_after(&mut self, round: KnockoutRound) -> Vec<BracketChange> {
        let mut changes: Vec<BracketChange> = Vec::new();
        let stage: u8 = round.stage();

        if stage < KnockoutRound::Semifinal.stage()
            && self.qualifiers == Qualifiers::Eight
            && !self.semifinals.is_empty()
        {
            self.semifinals.clear();
            changes.push(BracketChange::Cleared(KnockoutRound::Semifinal));
        }
        if stage < KnockoutRound::Final.stage() {
            if self.third_place.take().is_some() {
                changes.push(BracketChange::Cleared(KnockoutRound::ThirdPlace));
            }
            if self.final_match.take().is_some() {
                changes.push(BracketChange::Cleared(KnockoutRound::Final));
            }
        }
        changes
    }

    /// Seeds every stage whose predecessor is complete.
    fn advance(&mut self) -> Vec<BracketChange> {
        let mut changes: Vec<BracketChange> = Vec::new();

        if self.semifinals.is_empty() && self.round_complete(KnockoutRound::Quarterfinal) {
            let winners: Vec<Entrant> = self
                .quarterfinals
                .iter()
                .filter_map(KnockoutSlot::winner)
                .cloned()
                .collect();
            if let [qf1, qf2, qf3, qf4] = winners.as_slice() {
                self.semifinals = vec![
                    KnockoutSlot::pending(qf1.clone(), qf3.clone()),
                    KnockoutSlot::pending(qf2.clone(), qf4.clone()),
                ];
                changes.push(BracketChange::Seeded(KnockoutRound::Semifinal));
            }
        }

        if self.final_match.is_none() && self.round_complete(KnockoutRound::Semifinal) {
            if let [sf1, sf2] = self.semifinals.as_slice() {
                if let (Some(w1), Some(w2), Some(l1), Some(l2)) =
                    (sf1.winner(), sf2.winner(), sf1.loser(), sf2.loser())
                {
                    self.third_place = Some(KnockoutSlot::pending(l1.clone(), l2.clone()));
                    self.final_match = Some(KnockoutSlot::pending(w1.clone(), w2.clone()));
                    changes.push(BracketChange::Seeded(KnockoutRound::ThirdPlace));
                    changes.push(BracketChange::Seeded(KnockoutRound::Final));
                }
            }
        }

        changes
    }

    /// Returns whether both the final and the third-place match are recorded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.round_complete(KnockoutRound::Final) && self.round_complete(KnockoutRound::ThirdPlace)
    }

    /// Returns the final placings once the bracket is complete.
    #[must_use]
    pub fn podium(&self) -> Option<Podium> {
        let final_match: &KnockoutSlot = self.final_match.as_ref()?;
        let third_place: &KnockoutSlot = self.third_place.as_ref()?;
        Some(Podium {
            champion: final_match.winner()?.clone(),
            runner_up: final_match.loser()?.clone(),
            third: third_place.winner()?.clone(),
            fourth: third_place.loser()?.clone(),
        })
    }

    /// Returns the phase the bracket is in.
    #[must_use]
    pub fn phase(&self) -> TournamentPhase {
        if self.is_complete() {
            TournamentPhase::Complete
        } else if self.final_match.is_some() {
            TournamentPhase::Finals
        } else if !self.semifinals.is_empty() {
            TournamentPhase::Semifinals
        } else {
            TournamentPhase::Quarterfinals
        }
    }
}

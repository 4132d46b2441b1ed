// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group-stage match ledger.
//!
//! The ledger is the authoritative record of group-stage results in
//! submission order. Team statistics are derived from it; see
//! [`StatsTable::from_ledger`](crate::StatsTable::from_ledger).

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::types::{Entrant, TournamentConfig};
use crate::validation::{validate_matchup, validate_scores};

/// Structured key for an unordered pairing of two entrants.
///
/// The two entrants are stored in sorted order so that `(a, b)` and `(b, a)`
/// produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    first: Entrant,
    second: Entrant,
}

impl PairKey {
    /// Creates a key for the pairing of two entrants.
    #[must_use]
    pub fn new(a: &Entrant, b: &Entrant) -> Self {
        if a <= b {
            Self {
                first: a.clone(),
                second: b.clone(),
            }
        } else {
            Self {
                first: b.clone(),
                second: a.clone(),
            }
        }
    }

    /// Returns whether the key contains the entrant.
    #[must_use]
    pub fn involves(&self, entrant: &Entrant) -> bool {
        &self.first == entrant || &self.second == entrant
    }

    /// Returns the two entrants in key order.
    #[must_use]
    pub const fn entrants(&self) -> (&Entrant, &Entrant) {
        (&self.first, &self.second)
    }
}

/// A single recorded match result.
///
/// The winner is always derived from the scores; it cannot be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The first entrant (Pool A in cross-pool schedules).
    pub entrant_a: Entrant,
    /// The second entrant (Pool B in cross-pool schedules).
    pub entrant_b: Entrant,
    /// Points scored by `entrant_a`.
    pub score_a: u32,
    /// Points scored by `entrant_b`.
    pub score_b: u32,
}

impl MatchRecord {
    /// Creates a new record after checking that it is not a draw.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DrawNotAllowed` if the scores are equal, or
    /// `DomainError::Validation` if either is above `MAX_SCORE`.
    pub fn new(
        entrant_a: Entrant,
        entrant_b: Entrant,
        score_a: u32,
        score_b: u32,
    ) -> Result<Self, DomainError> {
        validate_scores(&entrant_a, &entrant_b, score_a, score_b)?;
        Ok(Self {
            entrant_a,
            entrant_b,
            score_a,
            score_b,
        })
    }

    /// Returns the winning entrant.
    #[must_use]
    pub const fn winner(&self) -> &Entrant {
        if self.score_a > self.score_b {
            &self.entrant_a
        } else {
            &self.entrant_b
        }
    }

    /// Returns the losing entrant.
    #[must_use]
    pub const fn loser(&self) -> &Entrant {
        if self.score_a > self.score_b {
            &self.entrant_b
        } else {
            &self.entrant_a
        }
    }

    /// Returns the pairing key for this record.
    #[must_use]
    pub fn key(&self) -> PairKey {
        PairKey::new(&self.entrant_a, &self.entrant_b)
    }

    /// Returns whether the record involves the entrant.
    #[must_use]
    pub fn involves(&self, entrant: &Entrant) -> bool {
        &self.entrant_a == entrant || &self.entrant_b == entrant
    }

    /// Returns the points scored by `entrant` in this match, if it took part.
    #[must_use]
    pub fn points_for(&self, entrant: &Entrant) -> Option<u32> {
        if &self.entrant_a == entrant {
            Some(self.score_a)
        } else if &self.entrant_b == entrant {
            Some(self.score_b)
        } else {
            None
        }
    }
}

/// The ordered collection of group-stage results.
///
/// Insertion order is submission order. Records are only replaced by an
/// edit or dropped by a removal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchLedger {
    records: Vec<MatchRecord>,
}

impl MatchLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Returns all records in submission order.
    #[must_use]
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Returns the number of recorded matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether no match has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` if no record exists at `index`.
    pub fn get(&self, index: usize) -> Result<&MatchRecord, DomainError> {
        self.records
            .get(index)
            .ok_or(DomainError::MatchNotFound { index })
    }

    /// Returns whether the pairing has been recorded in either orientation.
    #[must_use]
    pub fn contains_pair(&self, a: &Entrant, b: &Entrant) -> bool {
        let key: PairKey = PairKey::new(a, b);
        self.records.iter().any(|r| r.key() == key)
    }

    /// Returns the record for a pairing in either orientation.
    #[must_use]
    pub fn find_pair(&self, a: &Entrant, b: &Entrant) -> Option<&MatchRecord> {
        let key: PairKey = PairKey::new(a, b);
        self.records.iter().find(|r| r.key() == key)
    }

    /// Returns whether every scheduled pairing has been recorded.
    #[must_use]
    pub fn is_complete(&self, config: &TournamentConfig) -> bool {
        self.records.len() == config.scheduled_match_count()
    }

    /// Returns the scheduled pairings that have not been recorded yet.
    #[must_use]
    pub fn remaining_pairings(&self, config: &TournamentConfig) -> Vec<(Entrant, Entrant)> {
        config
            .scheduled_pairings()
            .into_iter()
            .filter(|(a, b)| !self.contains_pair(a, b))
            .collect()
    }

    /// Validates and appends a new result.
    ///
    /// # Arguments
    ///
    /// * `config` - The tournament configuration (pool rule)
    /// * `entrant_a` - The first entrant
    /// * `entrant_b` - The second entrant
    /// * `score_a` - Points scored by `entrant_a`
    /// * `score_b` - Points scored by `entrant_b`
    ///
    /// # Returns
    ///
    /// A copy of the appended record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The entrants may not meet under the schedule
    /// - The scores are equal
    /// - The pairing has already been recorded
    pub fn submit(
        &mut self,
        config: &TournamentConfig,
        entrant_a: Entrant,
        entrant_b: Entrant,
        score_a: u32,
        score_b: u32,
    ) -> Result<MatchRecord, DomainError> {
        validate_matchup(config, &entrant_a, &entrant_b)?;
        validate_scores(&entrant_a, &entrant_b, score_a, score_b)?;

        if self.contains_pair(&entrant_a, &entrant_b) {
            return Err(DomainError::DuplicateMatch {
                entrant_a: entrant_a.name().to_string(),
                entrant_b: entrant_b.name().to_string(),
            });
        }

        let record: MatchRecord = MatchRecord::new(entrant_a, entrant_b, score_a, score_b)?;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replaces the scores of the record at `index`.
    ///
    /// # Returns
    ///
    /// The `(old, new)` records so the caller can roll back the old
    /// contribution before applying the new one.
    ///
    /// # Errors
    ///
    /// Returns an error if no record exists at `index` or the new scores
    /// are equal.
    pub fn edit(
        &mut self,
        index: usize,
        score_a: u32,
        score_b: u32,
    ) -> Result<(MatchRecord, MatchRecord), DomainError> {
        let old: MatchRecord = self.get(index)?.clone();
        let new: MatchRecord = MatchRecord::new(
            old.entrant_a.clone(),
            old.entrant_b.clone(),
            score_a,
            score_b,
        )?;
        if let Some(slot) = self.records.get_mut(index) {
            *slot = new.clone();
        }
        Ok((old, new))
    }

    /// Removes the record at `index` so the pairing can be re-entered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MatchNotFound` if no record exists at `index`.
    pub fn remove(&mut self, index: usize) -> Result<MatchRecord, DomainError> {
        if index >= self.records.len() {
            return Err(DomainError::MatchNotFound { index });
        }
        Ok(self.records.remove(index))
    }
}

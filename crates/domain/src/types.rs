// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Represents the coarse lifecycle phase of a tournament.
///
/// The phase is always re-derived from the ledger, tie-breaker records and
/// bracket after a transition; it is stored so that renderers and snapshots
/// can read it without recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TournamentPhase {
    /// Group-stage matches are still being recorded.
    #[default]
    League,
    /// The group stage is complete but a material tie awaits resolution.
    TieBreaking,
    /// Quarterfinal results are being recorded.
    Quarterfinals,
    /// Semifinal results are being recorded.
    Semifinals,
    /// Final and third-place results are being recorded.
    Finals,
    /// Final and third-place matches are both recorded.
    Complete,
}

impl FromStr for TournamentPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "league" => Ok(Self::League),
            "tie_breaking" => Ok(Self::TieBreaking),
            "quarterfinals" => Ok(Self::Quarterfinals),
            "semifinals" => Ok(Self::Semifinals),
            "finals" => Ok(Self::Finals),
            "complete" => Ok(Self::Complete),
            _ => Err(DomainError::InvalidPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TournamentPhase {
    /// Converts this phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::League => "league",
            Self::TieBreaking => "tie_breaking",
            Self::Quarterfinals => "quarterfinals",
            Self::Semifinals => "semifinals",
            Self::Finals => "finals",
            Self::Complete => "complete",
        }
    }

    /// Checks if moving forward from this phase to `target` is a valid advance.
    ///
    /// Valid forward edges are:
    /// - League → `TieBreaking` | Quarterfinals | Semifinals
    /// - `TieBreaking` → Quarterfinals | Semifinals
    /// - Quarterfinals → Semifinals
    /// - Semifinals → Finals
    /// - Finals → Complete
    ///
    /// League may skip straight to Semifinals when only four entrants qualify.
    /// Every backward move is an invalidation, not an advance.
    #[must_use]
    pub const fn can_advance_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::League,
                Self::TieBreaking | Self::Quarterfinals | Self::Semifinals
            ) | (Self::TieBreaking, Self::Quarterfinals | Self::Semifinals)
                | (Self::Quarterfinals, Self::Semifinals)
                | (Self::Semifinals, Self::Finals)
                | (Self::Finals, Self::Complete)
        )
    }

    /// Returns whether the knockout bracket exists in this phase.
    #[must_use]
    pub const fn is_knockout(&self) -> bool {
        matches!(
            self,
            Self::Quarterfinals | Self::Semifinals | Self::Finals | Self::Complete
        )
    }
}

/// A registered tournament entrant.
///
/// The name is the sole identifier for an entrant within a tournament.
/// It serializes as a bare string and is trimmed on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Entrant {
    name: String,
}

impl Entrant {
    /// Creates a new `Entrant`. Surrounding whitespace is trimmed.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    /// Returns the entrant's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl From<String> for Entrant {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Entrant> for String {
    fn from(entrant: Entrant) -> Self {
        entrant.name
    }
}

impl std::fmt::Display for Entrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The seeding pool an entrant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pool {
    /// Pool A.
    A,
    /// Pool B.
    B,
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// How group-stage pairings are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Every Pool A entrant plays every Pool B entrant once.
    /// The Pool A entrant is always listed first.
    #[default]
    CrossPool,
    /// Every entrant plays every other entrant once.
    RoundRobin,
}

/// How many entrants qualify for the knockout bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Qualifiers {
    /// Eight qualifiers: quarterfinals, semifinals, finals.
    #[default]
    Eight,
    /// Four qualifiers: semifinals, finals.
    Four,
}

impl Qualifiers {
    /// Returns the number of qualifying entrants (the cutoff position).
    #[must_use]
    pub const fn count(&self) -> usize {
        match self {
            Self::Eight => 8,
            Self::Four => 4,
        }
    }
}

/// Policy deciding when an equal-standing run needs a tie-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Material only when the run has members on both sides of the cutoff.
    #[default]
    StraddleCutoff,
    /// Material when the run starts no lower than `cutoff + margin`.
    WithinMargin {
        /// Positions below the cutoff that still count.
        margin: usize,
    },
}

/// Fixed tournament configuration.
///
/// Constructed once at initialization and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Tournament name. Also the key under which snapshots are stored.
    pub name: String,
    /// Pool A entrants in registration order.
    pub pool_a: Vec<Entrant>,
    /// Pool B entrants in registration order. Empty for single-pool schedules.
    #[serde(default)]
    pub pool_b: Vec<Entrant>,
    /// Group-stage pairing rule.
    #[serde(default)]
    pub schedule: Schedule,
    /// Knockout bracket size.
    #[serde(default)]
    pub qualifiers: Qualifiers,
    /// Material tie policy.
    #[serde(default)]
    pub tie_policy: TiePolicy,
}

impl TournamentConfig {
    /// Creates and validates a new configuration.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfiguration` if:
    /// - The name is empty
    /// - An entrant name is empty or repeated
    /// - A cross-pool schedule is missing either pool
    /// - Fewer entrants are registered than the bracket needs
    pub fn new(
        name: &str,
        pool_a: &[&str],
        pool_b: &[&str],
        schedule: Schedule,
        qualifiers: Qualifiers,
        tie_policy: TiePolicy,
    ) -> Result<Self, DomainError> {
        let config: Self = Self {
            name: name.trim().to_string(),
            pool_a: pool_a.iter().map(|n| Entrant::new(n)).collect(),
            pool_b: pool_b.iter().map(|n| Entrant::new(n)).collect(),
            schedule,
            qualifiers,
            tie_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration invariants.
    ///
    /// # Errors
    ///
    /// See [`TournamentConfig::new`].
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::InvalidConfiguration(String::from(
                "tournament name cannot be empty",
            )));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for entrant in self.entrants() {
            if entrant.name().is_empty() {
                return Err(DomainError::InvalidConfiguration(String::from(
                    "entrant names cannot be empty",
                )));
            }
            if !seen.insert(entrant.name()) {
                return Err(DomainError::InvalidConfiguration(format!(
                    "entrant '{entrant}' is registered more than once"
                )));
            }
        }

        if self.schedule == Schedule::CrossPool && (self.pool_a.is_empty() || self.pool_b.is_empty())
        {
            return Err(DomainError::InvalidConfiguration(String::from(
                "a cross-pool schedule needs entrants in both pools",
            )));
        }

        let needed: usize = self.qualifiers.count();
        if seen.len() < needed {
            return Err(DomainError::InvalidConfiguration(format!(
                "{needed} qualifiers requested but only {} entrants registered",
                seen.len()
            )));
        }

        Ok(())
    }

    /// Returns every entrant in registration order (Pool A, then Pool B).
    pub fn entrants(&self) -> impl Iterator<Item = &Entrant> {
        self.pool_a.iter().chain(self.pool_b.iter())
    }

    /// Returns the number of registered entrants.
    #[must_use]
    pub fn entrant_count(&self) -> usize {
        self.pool_a.len() + self.pool_b.len()
    }

    /// Returns the pool an entrant belongs to, if registered.
    #[must_use]
    pub fn pool_of(&self, entrant: &Entrant) -> Option<Pool> {
        if self.pool_a.contains(entrant) {
            Some(Pool::A)
        } else if self.pool_b.contains(entrant) {
            Some(Pool::B)
        } else {
            None
        }
    }

    /// Resolves an entrant by name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownEntrant` if no entrant has that name.
    pub fn resolve(&self, name: &str) -> Result<Entrant, DomainError> {
        let candidate: Entrant = Entrant::new(name);
        if candidate.name().is_empty() {
            return Err(DomainError::validation("entrant", "an entrant must be selected"));
        }
        self.entrants()
            .find(|e| **e == candidate)
            .cloned()
            .ok_or(DomainError::UnknownEntrant(candidate.name))
    }

    /// Returns the number of group-stage matches in a full schedule.
    #[must_use]
    pub fn scheduled_match_count(&self) -> usize {
        match self.schedule {
            Schedule::CrossPool => self.pool_a.len() * self.pool_b.len(),
            Schedule::RoundRobin => {
                let n: usize = self.entrant_count();
                n * n.saturating_sub(1) / 2
            }
        }
    }

    /// Returns every scheduled group-stage pairing in schedule order.
    #[must_use]
    pub fn scheduled_pairings(&self) -> Vec<(Entrant, Entrant)> {
        match self.schedule {
            Schedule::CrossPool => self
                .pool_a
                .iter()
                .flat_map(|a| self.pool_b.iter().map(move |b| (a.clone(), b.clone())))
                .collect(),
            Schedule::RoundRobin => {
                let all: Vec<&Entrant> = self.entrants().collect();
                let mut pairings: Vec<(Entrant, Entrant)> = Vec::new();
                for (i, a) in all.iter().enumerate() {
                    for b in all.iter().skip(i + 1) {
                        pairings.push(((*a).clone(), (*b).clone()));
                    }
                }
                pairings
            }
        }
    }
}

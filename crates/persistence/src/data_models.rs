// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use tourney_audit::{Action, Actor, Cause, StateSnapshot};
use tourney_domain::TournamentPhase;

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

impl From<&Actor> for ActorData {
    fn from(actor: &Actor) -> Self {
        Self {
            id: actor.id.clone(),
            actor_type: actor.actor_type.clone(),
        }
    }
}

impl From<ActorData> for Actor {
    fn from(data: ActorData) -> Self {
        Self::new(data.id, data.actor_type)
    }
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

impl From<&Cause> for CauseData {
    fn from(cause: &Cause) -> Self {
        Self {
            id: cause.id.clone(),
            description: cause.description.clone(),
        }
    }
}

impl From<CauseData> for Cause {
    fn from(data: CauseData) -> Self {
        Self::new(data.id, data.description)
    }
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

impl From<&Action> for ActionData {
    fn from(action: &Action) -> Self {
        Self {
            name: action.name.clone(),
            details: action.details.clone(),
        }
    }
}

impl From<ActionData> for Action {
    fn from(data: ActionData) -> Self {
        Self::new(data.name, data.details)
    }
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub phase: String,
    pub summary: String,
}

impl From<&StateSnapshot> for StateSnapshotData {
    fn from(snapshot: &StateSnapshot) -> Self {
        Self {
            phase: snapshot.phase.as_str().to_string(),
            summary: snapshot.summary.clone(),
        }
    }
}

impl TryFrom<StateSnapshotData> for StateSnapshot {
    type Error = PersistenceError;

    fn try_from(data: StateSnapshotData) -> Result<Self, Self::Error> {
        let phase: TournamentPhase = data
            .phase
            .parse::<TournamentPhase>()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        Ok(Self::new(phase, data.summary))
    }
}

/// One row of the tournament listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSummary {
    /// The tournament name.
    pub tournament: String,
    /// The phase at the last save.
    pub phase: TournamentPhase,
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
}

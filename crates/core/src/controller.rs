// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence gateway seam and the controller that owns live state.

use tracing::{debug, info, warn};

use tourney_audit::{Actor, AuditEvent, Cause};
use tourney_domain::TournamentConfig;

use crate::apply::apply;
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Change, State, TransitionResult};

/// Storage for tournament snapshots and the audit trail.
///
/// Snapshots are keyed by tournament name. Implementations report failures
/// through `Self::Error`; the controller logs them and carries on.
pub trait SnapshotStore {
    /// The error type reported by the store.
    type Error: std::error::Error;

    /// Loads the most recent snapshot for a tournament, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the snapshot is corrupt.
    fn load_snapshot(&mut self, tournament: &str) -> Result<Option<State>, Self::Error>;

    /// Replaces the stored snapshot for the state's tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn save_snapshot(&mut self, state: &State) -> Result<(), Self::Error>;

    /// Deletes the stored snapshot and audit trail for a tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear_snapshot(&mut self, tournament: &str) -> Result<(), Self::Error>;

    /// Appends an audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn record_event(&mut self, event: &AuditEvent) -> Result<(), Self::Error>;
}

/// Owns the live tournament state and keeps the store in step with it.
#[derive(Debug)]
pub struct TournamentController<S: SnapshotStore> {
    state: State,
    store: S,
}

impl<S: SnapshotStore> TournamentController<S> {
    /// Opens a tournament, preferring the stored snapshot over `config`.
    ///
    /// # Arguments
    ///
    /// * `store` - The snapshot store
    /// * `tournament` - The snapshot key
    /// * `config` - Configuration for a fresh tournament when nothing is stored
    ///
    /// # Errors
    ///
    /// Returns `CoreError::TournamentNotFound` if nothing is stored under
    /// `tournament` and no configuration was given, or a domain error if the
    /// configuration is invalid.
    pub fn open(
        mut store: S,
        tournament: &str,
        config: Option<TournamentConfig>,
    ) -> Result<Self, CoreError> {
        let loaded: Option<State> = store.load_snapshot(tournament).unwrap_or_else(|e| {
            warn!(tournament, error = %e, "Failed to load snapshot; starting fresh");
            None
        });

        let state: State = match (loaded, config) {
            (Some(state), config) => {
                if config.is_some_and(|c| c != state.config) {
                    warn!(tournament, "Stored tournament differs from configuration; using stored");
                }
                info!(
                    tournament,
                    phase = %state.phase,
                    matches = state.ledger.len(),
                    "Resumed tournament"
                );
                state
            }
            (None, Some(config)) => {
                config.validate()?;
                info!(
                    tournament = %config.name,
                    entrants = config.entrant_count(),
                    "Starting new tournament"
                );
                State::new(config)
            }
            (None, None) => return Err(CoreError::TournamentNotFound(tournament.to_string())),
        };

        Ok(Self { state, store })
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the controller, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Applies a command and persists the result.
    ///
    /// The new state is swapped in only if the command succeeds. Store
    /// failures are logged and never undo the in-memory transition.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected; the state is unchanged.
    pub fn execute(
        &mut self,
        command: Command,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<Change>, CoreError> {
        let result: TransitionResult = apply(&self.state, command, actor, cause)?;
        let reset: bool = result.is_reset();
        self.state = result.new_state;

        let key: String = self.state.name().to_string();
        if reset {
            if let Err(e) = self.store.clear_snapshot(&key) {
                warn!(tournament = %key, error = %e, "Failed to clear stored tournament");
            }
        }
        if let Err(e) = self.store.record_event(&result.audit_event) {
            warn!(tournament = %key, error = %e, "Failed to record audit event");
        }
        if !reset {
            debug!(tournament = %key, phase = %self.state.phase, "Saving snapshot");
            if let Err(e) = self.store.save_snapshot(&self.state) {
                warn!(tournament = %key, error = %e, "Failed to save snapshot");
            }
        }

        Ok(result.changes)
    }
}

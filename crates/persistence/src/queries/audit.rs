// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tourney_audit::{AuditEvent, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    tournament: String,
    #[allow(dead_code)]
    action_name: String,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    #[allow(dead_code)]
    created_at: Option<String>,
}

impl AuditEventRow {
    fn into_event(self) -> Result<(i64, AuditEvent), PersistenceError> {
        let actor: ActorData = serde_json::from_str(&self.actor_json)?;
        let cause: CauseData = serde_json::from_str(&self.cause_json)?;
        let action: ActionData = serde_json::from_str(&self.action_json)?;
        let before: StateSnapshotData = serde_json::from_str(&self.before_snapshot_json)?;
        let after: StateSnapshotData = serde_json::from_str(&self.after_snapshot_json)?;

        Ok((
            self.event_id,
            AuditEvent::new(
                self.tournament,
                actor.into(),
                cause.into(),
                action.into(),
                StateSnapshot::try_from(before)?,
                StateSnapshot::try_from(after)?,
            ),
        ))
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    row.into_event().map(|(_, event)| event)
}

/// Retrieves every audit event of a tournament in the order they were recorded.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    tournament: &str,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    audit_events::table
        .filter(audit_events::tournament.eq(tournament))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEventRow::into_event)
        .collect()
}

/// Counts the audit events of a tournament.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_audit_events(
    conn: &mut SqliteConnection,
    tournament: &str,
) -> Result<i64, PersistenceError> {
    Ok(audit_events::table
        .filter(audit_events::tournament.eq(tournament))
        .count()
        .get_result(conn)?)
}

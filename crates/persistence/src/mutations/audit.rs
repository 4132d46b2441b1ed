// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;
use tourney_audit::AuditEvent;

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crate::now_rfc3339;

#[derive(Insertable)]
#[diesel(table_name = audit_events)]
struct NewAuditEvent<'a> {
    tournament: &'a str,
    action_name: &'a str,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
    created_at: Option<String>,
}

/// Persists an audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The audit event to persist
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let row: NewAuditEvent<'_> = NewAuditEvent {
        tournament: &event.tournament,
        action_name: &event.action.name,
        actor_json: serde_json::to_string(&ActorData::from(&event.actor))?,
        cause_json: serde_json::to_string(&CauseData::from(&event.cause))?,
        action_json: serde_json::to_string(&ActionData::from(&event.action))?,
        before_snapshot_json: serde_json::to_string(&StateSnapshotData::from(&event.before))?,
        after_snapshot_json: serde_json::to_string(&StateSnapshotData::from(&event.after))?,
        created_at: Some(now_rfc3339()?),
    };

    let event_id: i64 = diesel::insert_into(audit_events::table)
        .values(&row)
        .returning(audit_events::event_id)
        .get_result(conn)?;

    debug!(
        event_id,
        tournament = %event.tournament,
        action = %event.action.name,
        "Audit event persisted"
    );
    Ok(event_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use tracing::debug;

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Diesel Queryable struct for audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    driver_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self {
            event_id: Some(row.event_id),
            actor,
            cause,
            action,
            before,
            after,
            driver_id: row.driver_id,
        })
    }
}

/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event does not exist or cannot be decoded.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Audit event {event_id}")))?;

    AuditEvent::try_from(row)
}

/// Lists audit events in the order they were recorded.
///
/// With `driver_id` set, only events scoped to that driver are returned.
/// Otherwise the whole trail is returned, global events included.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be decoded.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    driver_id: Option<i64>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    debug!(?driver_id, "Loading audit trail");

    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .into_boxed();

    if let Some(id) = driver_id {
        query = query.filter(audit_events::driver_id.eq(id));
    }

    let rows: Vec<AuditEventRow> = query.load(conn)?;
    rows.into_iter().map(AuditEvent::try_from).collect()
}

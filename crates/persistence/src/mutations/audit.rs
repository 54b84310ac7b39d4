// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_audit::AuditEvent;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event and returns its identifier.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The audit event to persist
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: String = serde_json::to_string(&event.before)?;
    let after_json: String = serde_json::to_string(&event.after)?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::driver_id.eq(event.driver_id),
            audit_events::actor_account_id.eq(event.actor.account_id),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(&before_json),
            audit_events::after_snapshot_json.eq(&after_json),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    debug!(event_id, action = %event.action.name, "Audit event persisted");
    Ok(event_id)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::{ModificationRequest, ModificationStatus};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{format_date, format_timestamp};
use crate::diesel_schema::modification_requests;
use crate::error::PersistenceError;

/// Stores a new request and returns its identifier.
///
/// # Errors
///
/// Returns an error if the field maps cannot be serialized or the insert fails.
pub fn insert_modification_request(
    conn: &mut SqliteConnection,
    request: &ModificationRequest,
) -> Result<i64, PersistenceError> {
    let original_json: String = serde_json::to_string(&request.original)?;
    let proposed_json: String = serde_json::to_string(&request.proposed)?;

    diesel::insert_into(modification_requests::table)
        .values((
            modification_requests::driver_id.eq(request.driver_id),
            modification_requests::side.eq(request.side.as_str()),
            modification_requests::shift_date.eq(format_date(request.shift_date)?),
            modification_requests::original_json.eq(&original_json),
            modification_requests::proposed_json.eq(&proposed_json),
            modification_requests::justification.eq(&request.justification),
            modification_requests::status.eq(request.status.as_str()),
            modification_requests::admin_comment.eq(&request.admin_comment),
            modification_requests::created_at.eq(format_timestamp(request.created_at)?),
        ))
        .execute(conn)?;

    let request_id: i64 = conn.get_last_insert_rowid()?;
    debug!(request_id, driver_id = request.driver_id, "Modification request stored");
    Ok(request_id)
}

/// Records the decision carried by `request`.
///
/// The update only matches a row that is still `PENDING`, so of two
/// concurrent decisions exactly one lands. Returns the number of rows
/// changed: zero means the request was already decided or does not exist.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn record_modification_decision(
    conn: &mut SqliteConnection,
    request_id: i64,
    request: &ModificationRequest,
) -> Result<usize, PersistenceError> {
    let decided_at: Option<String> = request.decided_at.map(format_timestamp).transpose()?;

    let updated: usize = diesel::update(modification_requests::table)
        .filter(modification_requests::request_id.eq(request_id))
        .filter(modification_requests::status.eq(ModificationStatus::Pending.as_str()))
        .set((
            modification_requests::status.eq(request.status.as_str()),
            modification_requests::reviewer_account_id.eq(request.reviewer_account_id),
            modification_requests::admin_comment.eq(&request.admin_comment),
            modification_requests::decided_at.eq(decided_at),
        ))
        .execute(conn)?;

    Ok(updated)
}

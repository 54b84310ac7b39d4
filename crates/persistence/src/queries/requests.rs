// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::{ModificationRequest, RawFields};
use tracing::debug;

use crate::data_models::{RequestFilter, parse_date, parse_stored, parse_timestamp};
use crate::diesel_schema::modification_requests;
use crate::error::PersistenceError;

/// Diesel Queryable struct for modification request rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = modification_requests)]
struct ModificationRequestRow {
    request_id: i64,
    driver_id: i64,
    side: String,
    shift_date: String,
    original_json: String,
    proposed_json: String,
    justification: String,
    status: String,
    reviewer_account_id: Option<i64>,
    admin_comment: String,
    created_at: String,
    decided_at: Option<String>,
}

impl TryFrom<ModificationRequestRow> for ModificationRequest {
    type Error = PersistenceError;

    fn try_from(row: ModificationRequestRow) -> Result<Self, Self::Error> {
        let original: RawFields = serde_json::from_str(&row.original_json)?;
        let proposed: RawFields = serde_json::from_str(&row.proposed_json)?;

        Ok(Self {
            request_id: Some(row.request_id),
            driver_id: row.driver_id,
            side: parse_stored(&row.side)?,
            shift_date: parse_date(&row.shift_date)?,
            original,
            proposed,
            justification: row.justification,
            status: parse_stored(&row.status)?,
            reviewer_account_id: row.reviewer_account_id,
            admin_comment: row.admin_comment,
            created_at: parse_timestamp(&row.created_at)?,
            decided_at: row.decided_at.as_deref().map(parse_timestamp).transpose()?,
        })
    }
}

/// Retrieves a modification request by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
/// Returns `Ok(None)` if the request does not exist.
pub fn get_modification_request(
    conn: &mut SqliteConnection,
    request_id: i64,
) -> Result<Option<ModificationRequest>, PersistenceError> {
    debug!(request_id, "Looking up modification request");

    let row: Option<ModificationRequestRow> = modification_requests::table
        .filter(modification_requests::request_id.eq(request_id))
        .select(ModificationRequestRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ModificationRequest::try_from).transpose()
}

/// Lists modification requests matching `filter`, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_modification_requests(
    conn: &mut SqliteConnection,
    filter: &RequestFilter,
) -> Result<Vec<ModificationRequest>, PersistenceError> {
    let mut query = modification_requests::table
        .select(ModificationRequestRow::as_select())
        .order(modification_requests::request_id.asc())
        .into_boxed();

    if let Some(ids) = &filter.driver_ids {
        query = query.filter(modification_requests::driver_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(modification_requests::status.eq(status.as_str()));
    }

    let rows: Vec<ModificationRequestRow> = query.load(conn)?;
    rows.into_iter().map(ModificationRequest::try_from).collect()
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment edge queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use taxi_ledger_domain::AssignmentEdge;

use crate::data_models::parse_timestamp;
use crate::diesel_schema::assignment_edges;
use crate::error::PersistenceError;

/// Diesel Queryable struct for assignment edge rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = assignment_edges)]
struct AssignmentEdgeRow {
    edge_id: i64,
    driver_id: i64,
    supervisor_account_id: i64,
    active: i32,
    created_by: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<AssignmentEdgeRow> for AssignmentEdge {
    type Error = PersistenceError;

    fn try_from(row: AssignmentEdgeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            edge_id: Some(row.edge_id),
            driver_id: row.driver_id,
            supervisor_account_id: row.supervisor_account_id,
            active: row.active != 0,
            created_by: row.created_by,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Retrieves the edge between a driver and a supervisor, active or not.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
pub fn get_assignment_edge(
    conn: &mut SqliteConnection,
    driver_id: i64,
    supervisor_account_id: i64,
) -> Result<Option<AssignmentEdge>, PersistenceError> {
    let row: Option<AssignmentEdgeRow> = assignment_edges::table
        .filter(assignment_edges::driver_id.eq(driver_id))
        .filter(assignment_edges::supervisor_account_id.eq(supervisor_account_id))
        .select(AssignmentEdgeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AssignmentEdge::try_from).transpose()
}

/// Lists a supervisor's edges, optionally only the active ones.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_assignment_edges(
    conn: &mut SqliteConnection,
    supervisor_account_id: i64,
    active_only: bool,
) -> Result<Vec<AssignmentEdge>, PersistenceError> {
    let mut query = assignment_edges::table
        .filter(assignment_edges::supervisor_account_id.eq(supervisor_account_id))
        .select(AssignmentEdgeRow::as_select())
        .order(assignment_edges::driver_id.asc())
        .into_boxed();

    if active_only {
        query = query.filter(assignment_edges::active.eq(1));
    }

    let rows: Vec<AssignmentEdgeRow> = query.load(conn)?;
    rows.into_iter().map(AssignmentEdge::try_from).collect()
}

/// Returns the drivers with an active edge to the supervisor.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn assigned_driver_ids(
    conn: &mut SqliteConnection,
    supervisor_account_id: i64,
) -> Result<BTreeSet<i64>, PersistenceError> {
    let ids: Vec<i64> = assignment_edges::table
        .filter(assignment_edges::supervisor_account_id.eq(supervisor_account_id))
        .filter(assignment_edges::active.eq(1))
        .select(assignment_edges::driver_id)
        .load(conn)?;
    Ok(ids.into_iter().collect())
}

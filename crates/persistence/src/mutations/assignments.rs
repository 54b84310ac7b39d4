// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment edge mutations.
//!
//! Edges are never deleted by the ledger; unassignment flips `active`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::AssignmentEdge;

use crate::backend::PersistenceBackend;
use crate::data_models::{flag, format_timestamp};
use crate::diesel_schema::assignment_edges;
use crate::error::PersistenceError;

/// Inserts a new edge and returns its identifier.
///
/// # Errors
///
/// Returns `UniqueViolation` if the pair already has an edge.
pub fn insert_assignment_edge(
    conn: &mut SqliteConnection,
    edge: &AssignmentEdge,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(assignment_edges::table)
        .values((
            assignment_edges::driver_id.eq(edge.driver_id),
            assignment_edges::supervisor_account_id.eq(edge.supervisor_account_id),
            assignment_edges::active.eq(flag(edge.active)),
            assignment_edges::created_by.eq(edge.created_by),
            assignment_edges::created_at.eq(format_timestamp(edge.created_at)?),
            assignment_edges::updated_at.eq(format_timestamp(edge.updated_at)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Writes back the mutable state of an existing edge.
///
/// # Errors
///
/// Returns `NotFound` if the edge has no identifier or no longer exists.
pub fn update_assignment_edge(
    conn: &mut SqliteConnection,
    edge: &AssignmentEdge,
) -> Result<(), PersistenceError> {
    let edge_id: i64 = edge
        .edge_id
        .ok_or_else(|| {
            PersistenceError::NotFound("Assignment edge has no identifier".to_string())
        })?;

    let updated: usize = diesel::update(assignment_edges::table)
        .filter(assignment_edges::edge_id.eq(edge_id))
        .set((
            assignment_edges::active.eq(flag(edge.active)),
            assignment_edges::created_by.eq(edge.created_by),
            assignment_edges::updated_at.eq(format_timestamp(edge.updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Assignment edge {edge_id}")));
    }
    Ok(())
}

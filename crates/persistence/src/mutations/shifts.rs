// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in and check-out mutations.
//!
//! The `(driver_id, shift_date)` uniqueness of both tables is what makes a
//! concurrent second open or close fail instead of silently duplicating.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::{CheckIn, CheckOut};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{flag, format_date, format_time, format_timestamp};
use crate::diesel_schema::{checkins, checkouts};
use crate::error::PersistenceError;

/// Inserts a check-in and returns its identifier.
///
/// # Errors
///
/// Returns `UniqueViolation` if the driver already has a check-in on that
/// date, or another error if the insert fails.
pub fn insert_check_in(
    conn: &mut SqliteConnection,
    check_in: &CheckIn,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(checkins::table)
        .values((
            checkins::driver_id.eq(check_in.driver_id),
            checkins::shift_date.eq(format_date(check_in.shift_date)?),
            checkins::time_of_day.eq(format_time(check_in.time_of_day)?),
            checkins::target.eq(check_in.target),
            checkins::fuel_full.eq(flag(check_in.fuel_full)),
            checkins::issue_note.eq(check_in.issue_note.value()),
            checkins::signature.eq(&check_in.signature),
            checkins::created_at.eq(format_timestamp(check_in.created_at)?),
        ))
        .execute(conn)?;

    let check_in_id: i64 = conn.get_last_insert_rowid()?;
    debug!(check_in_id, driver_id = check_in.driver_id, "Check-in stored");
    Ok(check_in_id)
}

/// Inserts a check-out and returns its identifier.
///
/// # Errors
///
/// Returns `UniqueViolation` if the driver already closed that date, or
/// `ForeignKeyViolation` if there is no matching check-in.
pub fn insert_check_out(
    conn: &mut SqliteConnection,
    check_out: &CheckOut,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(checkouts::table)
        .values((
            checkouts::driver_id.eq(check_out.driver_id),
            checkouts::shift_date.eq(format_date(check_out.shift_date)?),
            checkouts::time_of_day.eq(format_time(check_out.time_of_day)?),
            checkouts::realized.eq(check_out.realized),
            checkouts::fuel_full.eq(flag(check_out.fuel_full)),
            checkouts::issue_note.eq(check_out.issue_note.value()),
            checkouts::signature.eq(&check_out.signature),
            checkouts::created_at.eq(format_timestamp(check_out.created_at)?),
        ))
        .execute(conn)?;

    let check_out_id: i64 = conn.get_last_insert_rowid()?;
    debug!(check_out_id, driver_id = check_out.driver_id, "Check-out stored");
    Ok(check_out_id)
}

/// Rewrites the editable columns of a stored check-in.
///
/// # Errors
///
/// Returns `NotFound` if the check-in has no identifier or no longer exists.
pub fn update_check_in(
    conn: &mut SqliteConnection,
    check_in: &CheckIn,
) -> Result<(), PersistenceError> {
    let check_in_id: i64 = check_in
        .check_in_id
        .ok_or_else(|| PersistenceError::NotFound("Check-in has no identifier".to_string()))?;

    let updated: usize = diesel::update(checkins::table)
        .filter(checkins::check_in_id.eq(check_in_id))
        .set((
            checkins::time_of_day.eq(format_time(check_in.time_of_day)?),
            checkins::target.eq(check_in.target),
            checkins::fuel_full.eq(flag(check_in.fuel_full)),
            checkins::issue_note.eq(check_in.issue_note.value()),
            checkins::signature.eq(&check_in.signature),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Check-in {check_in_id}")));
    }
    Ok(())
}

/// Rewrites the editable columns of a stored check-out.
///
/// # Errors
///
/// Returns `NotFound` if the check-out has no identifier or no longer exists.
pub fn update_check_out(
    conn: &mut SqliteConnection,
    check_out: &CheckOut,
) -> Result<(), PersistenceError> {
    let check_out_id: i64 = check_out
        .check_out_id
        .ok_or_else(|| PersistenceError::NotFound("Check-out has no identifier".to_string()))?;

    let updated: usize = diesel::update(checkouts::table)
        .filter(checkouts::check_out_id.eq(check_out_id))
        .set((
            checkouts::time_of_day.eq(format_time(check_out.time_of_day)?),
            checkouts::realized.eq(check_out.realized),
            checkouts::fuel_full.eq(flag(check_out.fuel_full)),
            checkouts::issue_note.eq(check_out.issue_note.value()),
            checkouts::signature.eq(&check_out.signature),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Check-out {check_out_id}")));
    }
    Ok(())
}

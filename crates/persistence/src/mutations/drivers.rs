// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver registry mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::Driver;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::flag;
use crate::diesel_schema::drivers;
use crate::error::PersistenceError;

/// Inserts a driver and returns its new identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_driver(
    conn: &mut SqliteConnection,
    driver: &Driver,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(drivers::table)
        .values((
            drivers::first_name.eq(&driver.first_name),
            drivers::last_name.eq(&driver.last_name),
            drivers::phone.eq(&driver.phone),
            drivers::email.eq(&driver.email),
            drivers::active.eq(flag(driver.active)),
        ))
        .execute(conn)?;

    let driver_id: i64 = conn.get_last_insert_rowid()?;
    info!(driver_id, "Driver registered");
    Ok(driver_id)
}

/// Sets the active flag of a driver.
///
/// # Errors
///
/// Returns `NotFound` if no driver has this identifier.
pub fn update_driver_active(
    conn: &mut SqliteConnection,
    driver_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(drivers::table)
        .filter(drivers::driver_id.eq(driver_id))
        .set(drivers::active.eq(flag(active)))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Driver {driver_id}")));
    }
    Ok(())
}

/// Deletes a driver. Shift records, requests, reports and assignment
/// edges of the driver go with it; audit events stay.
///
/// # Errors
///
/// Returns `NotFound` if no driver has this identifier.
pub fn delete_driver(conn: &mut SqliteConnection, driver_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(drivers::table.filter(drivers::driver_id.eq(driver_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Driver {driver_id}")));
    }
    info!(driver_id, "Driver removed");
    Ok(())
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver registry queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use taxi_ledger_domain::Driver;
use tracing::debug;

use crate::diesel_schema::drivers;
use crate::error::PersistenceError;

/// Diesel Queryable struct for driver rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = drivers)]
struct DriverRow {
    driver_id: i64,
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
    active: i32,
}

impl From<DriverRow> for Driver {
    fn from(row: DriverRow) -> Self {
        Self {
            driver_id: Some(row.driver_id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            email: row.email,
            active: row.active != 0,
        }
    }
}

/// Retrieves a driver by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the driver does not exist.
pub fn get_driver(
    conn: &mut SqliteConnection,
    driver_id: i64,
) -> Result<Option<Driver>, PersistenceError> {
    debug!(driver_id, "Looking up driver");

    let row: Option<DriverRow> = drivers::table
        .filter(drivers::driver_id.eq(driver_id))
        .select(DriverRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Driver::from))
}

/// Lists drivers ordered by last and first name.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `driver_ids` - Restricts the listing when present
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_drivers(
    conn: &mut SqliteConnection,
    driver_ids: Option<&[i64]>,
) -> Result<Vec<Driver>, PersistenceError> {
    let mut query = drivers::table
        .select(DriverRow::as_select())
        .order((drivers::last_name.asc(), drivers::first_name.asc()))
        .into_boxed();

    if let Some(ids) = driver_ids {
        query = query.filter(drivers::driver_id.eq_any(ids.to_vec()));
    }

    let rows: Vec<DriverRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Driver::from).collect())
}

/// Returns the identifiers of every driver.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn all_driver_ids(conn: &mut SqliteConnection) -> Result<BTreeSet<i64>, PersistenceError> {
    let ids: Vec<i64> = drivers::table.select(drivers::driver_id).load(conn)?;
    Ok(ids.into_iter().collect())
}

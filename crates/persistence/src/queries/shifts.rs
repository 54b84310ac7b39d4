// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in and check-out queries.
//!
//! Dates are stored as `YYYY-MM-DD` text, so range filters compare
//! lexicographically.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeMap;
use taxi_ledger::ShiftDay;
use taxi_ledger_domain::{CheckIn, CheckOut, IssueNote};
use time::Date;
use tracing::debug;

use crate::data_models::{ShiftFilter, format_date, parse_date, parse_time, parse_timestamp};
use crate::diesel_schema::{checkins, checkouts};
use crate::error::PersistenceError;

/// Diesel Queryable struct for check-in rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = checkins)]
struct CheckInRow {
    check_in_id: i64,
    driver_id: i64,
    shift_date: String,
    time_of_day: String,
    target: i64,
    fuel_full: i32,
    issue_note: String,
    signature: String,
    created_at: String,
}

/// Diesel Queryable struct for check-out rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = checkouts)]
struct CheckOutRow {
    check_out_id: i64,
    driver_id: i64,
    shift_date: String,
    time_of_day: String,
    realized: i64,
    fuel_full: i32,
    issue_note: String,
    signature: String,
    created_at: String,
}

impl TryFrom<CheckInRow> for CheckIn {
    type Error = PersistenceError;

    fn try_from(row: CheckInRow) -> Result<Self, Self::Error> {
        Ok(Self {
            check_in_id: Some(row.check_in_id),
            driver_id: row.driver_id,
            shift_date: parse_date(&row.shift_date)?,
            time_of_day: parse_time(&row.time_of_day)?,
            target: row.target,
            fuel_full: row.fuel_full != 0,
            issue_note: IssueNote::new(&row.issue_note),
            signature: row.signature,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

impl TryFrom<CheckOutRow> for CheckOut {
    type Error = PersistenceError;

    fn try_from(row: CheckOutRow) -> Result<Self, Self::Error> {
        Ok(Self {
            check_out_id: Some(row.check_out_id),
            driver_id: row.driver_id,
            shift_date: parse_date(&row.shift_date)?,
            time_of_day: parse_time(&row.time_of_day)?,
            realized: row.realized,
            fuel_full: row.fuel_full != 0,
            issue_note: IssueNote::new(&row.issue_note),
            signature: row.signature,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Loads both sides of a driver's shift on a date.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn load_shift_day(
    conn: &mut SqliteConnection,
    driver_id: i64,
    shift_date: Date,
) -> Result<ShiftDay, PersistenceError> {
    let date_text: String = format_date(shift_date)?;
    debug!(driver_id, shift_date = %date_text, "Loading shift day");

    let check_in: Option<CheckInRow> = checkins::table
        .filter(checkins::driver_id.eq(driver_id))
        .filter(checkins::shift_date.eq(&date_text))
        .select(CheckInRow::as_select())
        .first(conn)
        .optional()?;
    let check_out: Option<CheckOutRow> = checkouts::table
        .filter(checkouts::driver_id.eq(driver_id))
        .filter(checkouts::shift_date.eq(&date_text))
        .select(CheckOutRow::as_select())
        .first(conn)
        .optional()?;

    Ok(ShiftDay {
        driver_id,
        shift_date,
        check_in: check_in.map(CheckIn::try_from).transpose()?,
        check_out: check_out.map(CheckOut::try_from).transpose()?,
    })
}

/// Lists check-ins matching `filter`, newest date first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_check_ins(
    conn: &mut SqliteConnection,
    filter: &ShiftFilter,
) -> Result<Vec<CheckIn>, PersistenceError> {
    let mut query = checkins::table
        .select(CheckInRow::as_select())
        .order((checkins::shift_date.desc(), checkins::driver_id.asc()))
        .into_boxed();

    if let Some(ids) = &filter.driver_ids {
        query = query.filter(checkins::driver_id.eq_any(ids.clone()));
    }
    if let Some(from) = filter.from {
        query = query.filter(checkins::shift_date.ge(format_date(from)?));
    }
    if let Some(to) = filter.to {
        query = query.filter(checkins::shift_date.le(format_date(to)?));
    }

    let rows: Vec<CheckInRow> = query.load(conn)?;
    rows.into_iter().map(CheckIn::try_from).collect()
}

/// Lists check-outs matching `filter`, newest date first.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_check_outs(
    conn: &mut SqliteConnection,
    filter: &ShiftFilter,
) -> Result<Vec<CheckOut>, PersistenceError> {
    let mut query = checkouts::table
        .select(CheckOutRow::as_select())
        .order((checkouts::shift_date.desc(), checkouts::driver_id.asc()))
        .into_boxed();

    if let Some(ids) = &filter.driver_ids {
        query = query.filter(checkouts::driver_id.eq_any(ids.clone()));
    }
    if let Some(from) = filter.from {
        query = query.filter(checkouts::shift_date.ge(format_date(from)?));
    }
    if let Some(to) = filter.to {
        query = query.filter(checkouts::shift_date.le(format_date(to)?));
    }

    let rows: Vec<CheckOutRow> = query.load(conn)?;
    rows.into_iter().map(CheckOut::try_from).collect()
}

/// Pairs check-ins and check-outs matching `filter` into days.
///
/// Days are ordered by date, newest first, then by driver.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_shift_days(
    conn: &mut SqliteConnection,
    filter: &ShiftFilter,
) -> Result<Vec<ShiftDay>, PersistenceError> {
    let mut days: BTreeMap<(Date, i64), ShiftDay> = BTreeMap::new();

    for check_in in list_check_ins(conn, filter)? {
        let (date, driver_id): (Date, i64) = (check_in.shift_date, check_in.driver_id);
        let day: &mut ShiftDay = days
            .entry((date, driver_id))
            .or_insert_with(|| ShiftDay::new(driver_id, date));
        day.check_in = Some(check_in);
    }
    for check_out in list_check_outs(conn, filter)? {
        let (date, driver_id): (Date, i64) = (check_out.shift_date, check_out.driver_id);
        let day: &mut ShiftDay = days
            .entry((date, driver_id))
            .or_insert_with(|| ShiftDay::new(driver_id, date));
        day.check_out = Some(check_out);
    }

    let mut ordered: Vec<ShiftDay> = days.into_values().collect();
    ordered.sort_by(|a, b| {
        b.shift_date
            .cmp(&a.shift_date)
            .then(a.driver_id.cmp(&b.driver_id))
    });
    Ok(ordered)
}

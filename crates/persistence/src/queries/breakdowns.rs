// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Breakdown register queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::BreakdownReport;

use crate::data_models::{BreakdownFilter, parse_date, parse_stored, parse_timestamp};
use crate::diesel_schema::breakdown_reports;
use crate::error::PersistenceError;

/// Diesel Queryable struct for breakdown report rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = breakdown_reports)]
struct BreakdownReportRow {
    report_id: i64,
    driver_id: i64,
    shift_date: Option<String>,
    origin: String,
    description: String,
    severity: String,
    status: String,
    repair_cost: Option<i64>,
    repaired_at: Option<String>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BreakdownReportRow> for BreakdownReport {
    type Error = PersistenceError;

    fn try_from(row: BreakdownReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            report_id: Some(row.report_id),
            driver_id: row.driver_id,
            shift_date: row.shift_date.as_deref().map(parse_date).transpose()?,
            origin: parse_stored(&row.origin)?,
            description: row.description,
            severity: parse_stored(&row.severity)?,
            status: parse_stored(&row.status)?,
            repair_cost: row.repair_cost,
            repaired_at: row.repaired_at.as_deref().map(parse_timestamp).transpose()?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Retrieves a breakdown report by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
pub fn get_breakdown_report(
    conn: &mut SqliteConnection,
    report_id: i64,
) -> Result<Option<BreakdownReport>, PersistenceError> {
    let row: Option<BreakdownReportRow> = breakdown_reports::table
        .filter(breakdown_reports::report_id.eq(report_id))
        .select(BreakdownReportRow::as_select())
        .first(conn)
        .optional()?;

    row.map(BreakdownReport::try_from).transpose()
}

/// Lists breakdown reports matching `filter`, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is invalid.
pub fn list_breakdown_reports(
    conn: &mut SqliteConnection,
    filter: &BreakdownFilter,
) -> Result<Vec<BreakdownReport>, PersistenceError> {
    let mut query = breakdown_reports::table
        .select(BreakdownReportRow::as_select())
        .order(breakdown_reports::report_id.desc())
        .into_boxed();

    if let Some(ids) = &filter.driver_ids {
        query = query.filter(breakdown_reports::driver_id.eq_any(ids.clone()));
    }
    if let Some(status) = filter.status {
        query = query.filter(breakdown_reports::status.eq(status.as_str()));
    }
    if let Some(severity) = filter.severity {
        query = query.filter(breakdown_reports::severity.eq(severity.as_str()));
    }

    let rows: Vec<BreakdownReportRow> = query.load(conn)?;
    rows.into_iter().map(BreakdownReport::try_from).collect()
}

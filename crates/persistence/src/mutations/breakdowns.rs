// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Breakdown register mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use taxi_ledger_domain::BreakdownReport;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{format_date, format_timestamp};
use crate::diesel_schema::breakdown_reports;
use crate::error::PersistenceError;

/// Files a breakdown report and returns its identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_breakdown_report(
    conn: &mut SqliteConnection,
    report: &BreakdownReport,
) -> Result<i64, PersistenceError> {
    let shift_date: Option<String> = report.shift_date.map(format_date).transpose()?;
    let repaired_at: Option<String> = report.repaired_at.map(format_timestamp).transpose()?;

    diesel::insert_into(breakdown_reports::table)
        .values((
            breakdown_reports::driver_id.eq(report.driver_id),
            breakdown_reports::shift_date.eq(shift_date),
            breakdown_reports::origin.eq(report.origin.as_str()),
            breakdown_reports::description.eq(&report.description),
            breakdown_reports::severity.eq(report.severity.as_str()),
            breakdown_reports::status.eq(report.status.as_str()),
            breakdown_reports::repair_cost.eq(report.repair_cost),
            breakdown_reports::repaired_at.eq(repaired_at),
            breakdown_reports::created_at.eq(format_timestamp(report.created_at)?),
            breakdown_reports::updated_at.eq(format_timestamp(report.updated_at)?),
        ))
        .execute(conn)?;

    let report_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        report_id,
        driver_id = report.driver_id,
        origin = report.origin.as_str(),
        "Breakdown reported"
    );
    Ok(report_id)
}

/// Writes back the status, cost and repair time of a report.
///
/// # Errors
///
/// Returns `NotFound` if the report has no identifier or no longer exists.
pub fn update_breakdown_report(
    conn: &mut SqliteConnection,
    report: &BreakdownReport,
) -> Result<(), PersistenceError> {
    let report_id: i64 = report
        .report_id
        .ok_or_else(|| {
            PersistenceError::NotFound("Breakdown report has no identifier".to_string())
        })?;
    let repaired_at: Option<String> = report.repaired_at.map(format_timestamp).transpose()?;

    let updated: usize = diesel::update(breakdown_reports::table)
        .filter(breakdown_reports::report_id.eq(report_id))
        .set((
            breakdown_reports::status.eq(report.status.as_str()),
            breakdown_reports::repair_cost.eq(report.repair_cost),
            breakdown_reports::repaired_at.eq(repaired_at),
            breakdown_reports::updated_at.eq(format_timestamp(report.updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Breakdown report {report_id}")));
    }
    Ok(())
}

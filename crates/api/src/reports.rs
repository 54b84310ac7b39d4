// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only reports over the ledger.

use std::collections::BTreeMap;
use taxi_ledger::ShiftDay;
use taxi_ledger_audit::AuditEvent;
use taxi_ledger_domain::{Driver, Principal, ShiftState, classify};
use taxi_ledger_persistence::{Persistence, ShiftFilter};
use time::Date;

use crate::error::ApiError;
use crate::registry::list_drivers;
use crate::request_response::{DriverRevenue, RevenueSummary};
use crate::scope::authorize_driver_records;

#[derive(Default)]
struct Totals {
    days_closed: usize,
    target: i64,
    realized: i64,
}

impl Totals {
    fn add(&mut self, target: i64, realized: i64) -> Result<(), ApiError> {
        self.target = self.target.checked_add(target).ok_or_else(out_of_range)?;
        self.realized = self.realized.checked_add(realized).ok_or_else(out_of_range)?;
        Ok(())
    }
}

fn out_of_range() -> ApiError {
    ApiError::InvalidInput {
        message: String::from("Revenue totals for the period exceed the supported range"),
    }
}

/// Sums closed shifts between two dates, inclusive, per visible driver.
///
/// Only days with both sides recorded count. Each tier is computed on the
/// period totals, not averaged over days.
///
/// # Errors
///
/// Returns `InvalidInput` if `from` is after `to` or if a total does not
/// fit in an `i64`, or an error if a lookup fails.
pub fn revenue_summary(
    persistence: &mut Persistence,
    principal: &Principal,
    from: Date,
    to: Date,
) -> Result<RevenueSummary, ApiError> {
    if from > to {
        return Err(ApiError::InvalidInput {
            message: format!("Period start {from} is after its end {to}"),
        });
    }

    let drivers: Vec<Driver> = list_drivers(persistence, principal)?;
    let ids: Vec<i64> = drivers.iter().filter_map(|d| d.driver_id).collect();

    let filter: ShiftFilter = ShiftFilter {
        driver_ids: Some(ids),
        from: Some(from),
        to: Some(to),
    };
    let mut totals: BTreeMap<i64, Totals> = BTreeMap::new();
    for day in persistence.list_shift_days(&filter)? {
        if day.state() != ShiftState::Closed {
            continue;
        }
        let ShiftDay {
            driver_id,
            check_in,
            check_out,
            ..
        } = day;
        let entry: &mut Totals = totals.entry(driver_id).or_default();
        entry.days_closed += 1;
        entry.add(
            check_in.map_or(0, |c| c.target),
            check_out.map_or(0, |c| c.realized),
        )?;
    }

    let rows: Vec<DriverRevenue> = drivers
        .iter()
        .filter_map(|driver| {
            let driver_id: i64 = driver.driver_id?;
            let sums: Totals = totals.remove(&driver_id).unwrap_or_default();
            Some(DriverRevenue {
                driver_id,
                driver_name: driver.full_name(),
                days_closed: sums.days_closed,
                total_target: sums.target,
                total_realized: sums.realized,
                tier: classify(Some(sums.target), sums.realized).tier,
            })
        })
        .collect();

    let mut grand: Totals = Totals::default();
    for row in &rows {
        grand.add(row.total_target, row.total_realized)?;
    }

    Ok(RevenueSummary {
        from,
        to,
        drivers: rows,
        total_target: grand.target,
        total_realized: grand.realized,
        tier: classify(Some(grand.target), grand.realized).tier,
    })
}

/// Lists the audit events recorded against a driver, oldest first.
///
/// # Errors
///
/// Returns an error if the caller may not see the driver or the lookup fails.
pub fn audit_trail(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
) -> Result<Vec<AuditEvent>, ApiError> {
    authorize_driver_records(persistence, principal, driver_id, "audit_trail")?;
    Ok(persistence.list_audit_events(Some(driver_id))?)
}

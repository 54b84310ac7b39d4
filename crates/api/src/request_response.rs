// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These are plain data. Nothing here depends on a transport.

use serde::{Deserialize, Serialize};
use taxi_ledger_domain::{CheckOut, RawFields, Reconciliation, ShiftSide, Tier};
use time::Date;

/// Request to open a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenShiftRequest {
    /// Calendar date of the shift.
    pub shift_date: Date,
    /// Declared revenue target.
    pub target: i64,
    pub fuel_full: bool,
    /// Mechanical-issue note; `"none"` or blank when there is nothing to report.
    pub issue_note: String,
    pub signature: String,
}

/// Request to close a shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseShiftRequest {
    /// Calendar date of the shift being closed.
    pub shift_date: Date,
    /// Realized revenue.
    pub realized: i64,
    pub fuel_full: bool,
    pub issue_note: String,
    pub signature: String,
}

/// Request to propose a correction to a recorded shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitModificationRequest {
    pub side: ShiftSide,
    pub shift_date: Date,
    pub justification: String,
    /// Field name to proposed value.
    pub proposed: RawFields,
}

/// A successful result that may carry side-effect warnings.
///
/// A warning means the primary write committed but a follow-up, such as
/// filing a breakdown report, did not.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<String>,
}

impl<T> Outcome<T> {
    /// Returns true if every side effect succeeded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// The stored check-out and its reconciliation against the morning target.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseShiftResult {
    pub check_out: CheckOut,
    pub reconciliation: Reconciliation,
}

/// Per-item result of a best-effort batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BatchFailure>,
}

/// One failed item in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub driver_id: i64,
    pub reason: String,
}

/// Revenue totals for one driver over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverRevenue {
    pub driver_id: i64,
    pub driver_name: String,
    /// Days with both a check-in and a check-out.
    pub days_closed: usize,
    pub total_target: i64,
    pub total_realized: i64,
    /// Tier of the period totals.
    pub tier: Tier,
}

/// Revenue over a period for every driver the caller can see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub from: Date,
    pub to: Date,
    pub drivers: Vec<DriverRevenue>,
    pub total_target: i64,
    pub total_realized: i64,
    pub tier: Tier,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use taxi_ledger_domain::{BreakdownOrigin, BreakdownReport, BreakdownStatus, IssueNote, Severity};
use time::{Date, OffsetDateTime};

/// A fact emitted by a ledger transition for consumers outside the ledger.
///
/// Events are produced by pure transitions and dispatched only after the
/// primary write has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A driver noted a mechanical issue.
    IssueReported(IssueReported),
}

/// A mechanical-issue note attached to a shift record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReported {
    /// The reporting driver.
    pub driver_id: i64,
    /// The shift the note was written on.
    pub shift_date: Option<Date>,
    /// The note itself. Never the "none" sentinel.
    pub note: IssueNote,
    /// The default severity for the report this spawns.
    pub severity: Severity,
    /// Which write produced the note.
    pub origin: BreakdownOrigin,
}

impl IssueReported {
    /// Builds the breakdown report this event spawns.
    ///
    /// # Arguments
    ///
    /// * `now` - The creation timestamp of the report
    #[must_use]
    pub fn to_report(&self, now: OffsetDateTime) -> BreakdownReport {
        BreakdownReport {
            report_id: None,
            driver_id: self.driver_id,
            shift_date: self.shift_date,
            origin: self.origin,
            description: self.note.value().to_string(),
            severity: self.severity,
            status: BreakdownStatus::Reported,
            repair_cost: None,
            repaired_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Returns an `IssueReported` event when `note` is an actual report.
pub(crate) fn issue_event(
    driver_id: i64,
    shift_date: Date,
    note: &IssueNote,
    severity: Severity,
    origin: BreakdownOrigin,
) -> Option<LedgerEvent> {
    note.is_reported().then(|| {
        LedgerEvent::IssueReported(IssueReported {
            driver_id,
            shift_date: Some(shift_date),
            note: note.clone(),
            severity,
            origin,
        })
    })
}

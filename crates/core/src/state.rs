// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event::LedgerEvent;
use taxi_ledger_audit::{AuditEvent, StateSnapshot};
use taxi_ledger_domain::{
    AssignmentEdge, BreakdownReport, CheckIn, CheckOut, Driver, ModificationRequest,
    Reconciliation, ShiftState, classify,
};
use time::{Date, Duration};

/// The ledger records of one driver on one calendar date.
///
/// A `ShiftDay` is the unit every shift transition operates on. The shift
/// itself is never stored; its state is derived from which sides exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDay {
    /// The driver.
    pub driver_id: i64,
    /// The calendar date of the shift.
    pub shift_date: Date,
    /// The check-in, if recorded.
    pub check_in: Option<CheckIn>,
    /// The check-out, if recorded.
    pub check_out: Option<CheckOut>,
}

impl ShiftDay {
    /// Creates an empty day for a driver.
    ///
    /// # Arguments
    ///
    /// * `driver_id` - The driver
    /// * `shift_date` - The calendar date
    #[must_use]
    pub const fn new(driver_id: i64, shift_date: Date) -> Self {
        Self {
            driver_id,
            shift_date,
            check_in: None,
            check_out: None,
        }
    }

    /// Derives the shift state from the recorded sides.
    #[must_use]
    pub const fn state(&self) -> ShiftState {
        ShiftState::derive(self.check_in.is_some(), self.check_out.is_some())
    }

    /// Renders the day for an audit snapshot.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        let target: String = self
            .check_in
            .as_ref()
            .map_or_else(|| String::from("-"), |c| c.target.to_string());
        let realized: String = self
            .check_out
            .as_ref()
            .map_or_else(|| String::from("-"), |c| c.realized.to_string());
        StateSnapshot::new(format!(
            "driver={},date={},state={},target={target},realized={realized}",
            self.driver_id,
            self.shift_date,
            self.state().as_str()
        ))
    }

    /// Classifies the realized revenue against the declared target.
    ///
    /// Returns `None` until a check-out exists. A check-out without a
    /// check-in classifies as unknown.
    #[must_use]
    pub fn reconcile(&self) -> Option<Reconciliation> {
        self.check_out
            .as_ref()
            .map(|out| classify(self.check_in.as_ref().map(|c| c.target), out.realized))
    }

    /// Time between key handover and key return.
    ///
    /// A return earlier in the day than the handover crossed midnight.
    #[must_use]
    pub fn work_duration(&self) -> Option<Duration> {
        let check_in: &CheckIn = self.check_in.as_ref()?;
        let check_out: &CheckOut = self.check_out.as_ref()?;
        let elapsed: Duration = check_out.time_of_day - check_in.time_of_day;
        if elapsed.is_negative() {
            Some(elapsed + Duration::days(1))
        } else {
            Some(elapsed)
        }
    }

    /// Summarizes the day for history listings.
    #[must_use]
    pub fn summary(&self) -> ShiftSummary {
        ShiftSummary {
            driver_id: self.driver_id,
            shift_date: self.shift_date,
            state: self.state(),
            target: self.check_in.as_ref().map(|c| c.target),
            realized: self.check_out.as_ref().map(|c| c.realized),
            reconciliation: self.reconcile(),
            work_minutes: self.work_duration().map(|d| d.whole_minutes()),
        }
    }
}

/// A read-time view of one shift.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftSummary {
    pub driver_id: i64,
    pub shift_date: Date,
    pub state: ShiftState,
    pub target: Option<i64>,
    pub realized: Option<i64>,
    pub reconciliation: Option<Reconciliation>,
    pub work_minutes: Option<i64>,
}

/// The result of a successful shift transition.
///
/// Holds the new day, the audit event for the write, and the events to
/// dispatch once the write has committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTransition {
    pub new_day: ShiftDay,
    pub audit_event: AuditEvent,
    pub events: Vec<LedgerEvent>,
}

/// The result of submitting a modification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    pub request: ModificationRequest,
    pub audit_event: AuditEvent,
}

/// The result of deciding a modification request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionResult {
    /// The request in its terminal state.
    pub request: ModificationRequest,
    /// The patched day. `None` on rejection.
    pub new_day: Option<ShiftDay>,
    pub audit_event: AuditEvent,
    pub events: Vec<LedgerEvent>,
}

/// What an assignment transition did to the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    /// A new edge was created.
    Created,
    /// An inactive edge was reactivated.
    Revived,
    /// The edge was already in the requested state.
    Unchanged,
    /// An active edge was deactivated.
    Deactivated,
}

/// The result of an assignment or unassignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentTransition {
    pub edge: AssignmentEdge,
    pub change: EdgeChange,
    /// `None` when nothing changed.
    pub audit_event: Option<AuditEvent>,
}

/// The result of a breakdown register transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownTransition {
    pub report: BreakdownReport,
    pub audit_event: AuditEvent,
}

/// The result of a driver registry transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverTransition {
    pub driver: Driver,
    pub audit_event: AuditEvent,
}

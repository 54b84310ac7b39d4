// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::event::IssueReported;
use crate::state::BreakdownTransition;
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use taxi_ledger_domain::{
    BreakdownOrigin, BreakdownReport, BreakdownStatus, DomainError, Severity, validate_issue_note,
    validate_repair_cost,
};
use time::{Date, OffsetDateTime};

/// Records a breakdown reported by hand.
///
/// # Arguments
///
/// * `driver_id` - The reporting driver
/// * `shift_date` - The shift the issue was noticed on, if any
/// * `description` - What is wrong
/// * `severity` - How bad it is
/// * `now` - Creation timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns `InvalidIssueNote` if the description is blank or too long.
pub fn report_breakdown(
    driver_id: i64,
    shift_date: Option<Date>,
    description: &str,
    severity: Severity,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<BreakdownTransition, CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::DomainViolation(DomainError::InvalidIssueNote(
            String::from("a description is required"),
        )));
    }
    validate_issue_note(description)?;

    let report: BreakdownReport = BreakdownReport {
        report_id: None,
        driver_id,
        shift_date,
        origin: BreakdownOrigin::Manual,
        description: description.trim().to_string(),
        severity,
        status: BreakdownStatus::Reported,
        repair_cost: None,
        repaired_at: None,
        created_at: now,
        updated_at: now,
    };

    Ok(created(report, actor, cause))
}

/// Records the breakdown spawned by an issue note on a ledger write.
#[must_use]
pub fn report_from_event(
    event: &IssueReported,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> BreakdownTransition {
    created(event.to_report(now), actor, cause)
}

/// Moves a breakdown report along the repair lifecycle.
///
/// Reaching `repaired` stamps `repaired_at`. A repair cost may be recorded
/// with any transition.
///
/// # Arguments
///
/// * `report` - The current report
/// * `new_status` - The requested status
/// * `repair_cost` - The repair cost to record, if any
/// * `now` - Timestamp of the change
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the transition is not permitted or the cost is
/// negative.
pub fn apply_breakdown_update(
    report: &BreakdownReport,
    new_status: BreakdownStatus,
    repair_cost: Option<i64>,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<BreakdownTransition, CoreError> {
    report.status.validate_transition(new_status)?;
    if let Some(cost) = repair_cost {
        validate_repair_cost(cost)?;
    }

    let mut updated: BreakdownReport = report.clone();
    updated.status = new_status;
    updated.updated_at = now;
    if repair_cost.is_some() {
        updated.repair_cost = repair_cost;
    }
    if new_status == BreakdownStatus::Repaired {
        updated.repaired_at = Some(now);
    }

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("UpdateBreakdown"),
            Some(format!(
                "Breakdown moved from {} to {}",
                report.status.as_str(),
                new_status.as_str()
            )),
        ),
        report_snapshot(report),
        report_snapshot(&updated),
        report.driver_id,
    );

    Ok(BreakdownTransition {
        report: updated,
        audit_event,
    })
}

fn created(report: BreakdownReport, actor: Actor, cause: Cause) -> BreakdownTransition {
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("ReportBreakdown"),
            Some(format!(
                "{} breakdown reported from {}: {}",
                report.severity.as_str(),
                report.origin.as_str(),
                report.description
            )),
        ),
        StateSnapshot::new(String::from("report=none")),
        report_snapshot(&report),
        report.driver_id,
    );
    BreakdownTransition {
        report,
        audit_event,
    }
}

fn report_snapshot(report: &BreakdownReport) -> StateSnapshot {
    StateSnapshot::new(format!(
        "severity={},status={},repair_cost={}",
        report.severity.as_str(),
        report.status.as_str(),
        report
            .repair_cost
            .map_or_else(|| String::from("-"), |c| c.to_string())
    ))
}

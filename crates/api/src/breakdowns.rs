// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The breakdown register and the dispatcher that feeds it.
//!
//! Ledger writes never create breakdown reports themselves. They return
//! [`LedgerEvent`]s, and once their transaction has committed the caller
//! hands those events to an [`IssueSink`] through [`dispatch_events`]. A
//! sink failure becomes a warning on the committed outcome.

use taxi_ledger::{BreakdownTransition, IssueReported, LedgerEvent};
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{BreakdownReport, BreakdownStatus, Principal, Scope, Severity};
use taxi_ledger_persistence::Persistence;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::auth::{AuthorizationService, to_audit_actor};
use crate::error::{ApiError, translate_core_error};
use crate::scope::visible_drivers;

/// Consumer of issue events raised by ledger writes.
pub trait IssueSink {
    /// Files the breakdown report for an issue and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be stored.
    fn issue_reported(
        &mut self,
        persistence: &mut Persistence,
        event: &IssueReported,
        actor: &Actor,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<i64, ApiError>;
}

/// The default sink: stores a breakdown report with its audit event.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakdownRegister;

impl IssueSink for BreakdownRegister {
    fn issue_reported(
        &mut self,
        persistence: &mut Persistence,
        event: &IssueReported,
        actor: &Actor,
        cause: &Cause,
        now: OffsetDateTime,
    ) -> Result<i64, ApiError> {
        let transition: BreakdownTransition =
            taxi_ledger::report_from_event(event, now, actor.clone(), cause.clone());
        store_new_report(persistence, &transition)
    }
}

fn store_new_report(
    persistence: &mut Persistence,
    transition: &BreakdownTransition,
) -> Result<i64, ApiError> {
    persistence.transaction(|tx| -> Result<i64, ApiError> {
        let report_id: i64 = tx.insert_breakdown_report(&transition.report)?;
        tx.persist_audit_event(&transition.audit_event)?;
        info!(
            report_id,
            driver_id = transition.report.driver_id,
            severity = transition.report.severity.as_str(),
            "Filed breakdown report"
        );
        Ok(report_id)
    })
}

/// Hands committed ledger events to a sink.
///
/// Returns one warning per event the sink failed to handle.
pub fn dispatch_events(
    persistence: &mut Persistence,
    sink: &mut dyn IssueSink,
    events: &[LedgerEvent],
    actor: &Actor,
    cause: &Cause,
    now: OffsetDateTime,
) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();

    for event in events {
        match event {
            LedgerEvent::IssueReported(issue) => {
                if let Err(err) = sink.issue_reported(persistence, issue, actor, cause, now) {
                    warn!(
                        driver_id = issue.driver_id,
                        error = %err,
                        "Breakdown report could not be filed"
                    );
                    warnings.push(format!(
                        "The record was saved but the breakdown report could not be filed: {err}"
                    ));
                }
            }
        }
    }

    warnings
}

/// Files a breakdown report by hand.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `principal` - The reporting driver
/// * `description` - What is wrong
/// * `severity` - How bad it is
/// * `shift_date` - The shift the issue relates to, if any
/// * `now` - Current instant
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not linked to a driver
/// - The description is blank or too long
/// - The report cannot be stored
pub fn report_breakdown(
    persistence: &mut Persistence,
    principal: &Principal,
    description: &str,
    severity: Severity,
    shift_date: Option<Date>,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<BreakdownReport, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "report_breakdown")?;

    let transition: BreakdownTransition = taxi_ledger::report_breakdown(
        driver_id,
        shift_date,
        description,
        severity,
        now,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;

    let report_id: i64 = store_new_report(persistence, &transition)?;
    let mut report: BreakdownReport = transition.report;
    report.report_id = Some(report_id);
    Ok(report)
}

/// Moves a breakdown report along the repair lifecycle.
///
/// # Errors
///
/// Returns an error if:
/// - The caller sees no drivers at all
/// - The report does not exist
/// - The report's driver is outside the caller's scope
/// - The transition is not permitted or the cost is negative
pub fn update_breakdown_status(
    persistence: &mut Persistence,
    principal: &Principal,
    report_id: i64,
    status: BreakdownStatus,
    repair_cost: Option<i64>,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<BreakdownReport, ApiError> {
    let scope: Scope = visible_drivers(persistence, principal)?;
    if scope.is_empty() {
        return Err(ApiError::Unauthorized {
            message: String::from("Not authorized to update breakdown reports"),
        });
    }

    let report: BreakdownReport = persistence
        .get_breakdown_report(report_id)?
        .ok_or_else(|| {
            ApiError::not_found("BreakdownReport", format!("Report {report_id} does not exist"))
        })?;
    AuthorizationService::authorize_visible(&scope, report.driver_id, "update_breakdown_status")?;

    let transition: BreakdownTransition = taxi_ledger::apply_breakdown_update(
        &report,
        status,
        repair_cost,
        now,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;

    persistence.transaction(|tx| -> Result<(), ApiError> {
        tx.update_breakdown_report(&transition.report)?;
        tx.persist_audit_event(&transition.audit_event)?;
        Ok(())
    })?;

    info!(report_id, status = status.as_str(), "Updated breakdown report");
    Ok(transition.report)
}

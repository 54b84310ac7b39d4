// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_DRIVER, create_test_actor, create_test_cause, create_test_date, create_test_now,
};
use crate::{
    BreakdownTransition, CoreError, IssueReported, apply_breakdown_update, report_breakdown,
    report_from_event,
};
use taxi_ledger_domain::{
    BreakdownOrigin, BreakdownReport, BreakdownStatus, DomainError, ErrorKind, IssueNote, Severity,
};
use time::macros::datetime;

fn create_report() -> BreakdownReport {
    report_breakdown(
        TEST_DRIVER,
        None,
        "flat tyre",
        Severity::Major,
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .report
}

fn update(
    report: &BreakdownReport,
    status: BreakdownStatus,
    cost: Option<i64>,
) -> Result<BreakdownTransition, CoreError> {
    apply_breakdown_update(
        report,
        status,
        cost,
        datetime!(2024-06-04 12:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
}

#[test]
fn test_manual_report_starts_reported() {
    let report: BreakdownReport = create_report();

    assert_eq!(report.status, BreakdownStatus::Reported);
    assert_eq!(report.origin, BreakdownOrigin::Manual);
    assert_eq!(report.severity, Severity::Major);
    assert_eq!(report.repair_cost, None);
}

#[test]
fn test_manual_report_requires_description() {
    let err: CoreError = report_breakdown(
        TEST_DRIVER,
        None,
        "   ",
        Severity::Minor,
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InvalidIssueNote(_))
    ));
}

#[test]
fn test_report_from_issue_event() {
    let event: IssueReported = IssueReported {
        driver_id: TEST_DRIVER,
        shift_date: Some(create_test_date()),
        note: IssueNote::new("brake noise"),
        severity: Severity::Minor,
        origin: BreakdownOrigin::CheckIn,
    };

    let transition: BreakdownTransition = report_from_event(
        &event,
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(transition.report.description, "brake noise");
    assert_eq!(transition.report.severity, Severity::Minor);
    assert_eq!(transition.report.status, BreakdownStatus::Reported);
    assert_eq!(transition.report.shift_date, Some(create_test_date()));
    assert_eq!(transition.audit_event.action.name, "ReportBreakdown");
    assert_eq!(transition.audit_event.driver_id, Some(TEST_DRIVER));
}

#[test]
fn test_repair_lifecycle_stamps_repaired_at() {
    let in_repair: BreakdownReport = update(&create_report(), BreakdownStatus::InRepair, None)
        .unwrap()
        .report;
    assert_eq!(in_repair.repaired_at, None);

    let repaired: BreakdownReport = update(&in_repair, BreakdownStatus::Repaired, Some(320))
        .unwrap()
        .report;

    assert_eq!(repaired.status, BreakdownStatus::Repaired);
    assert_eq!(repaired.repair_cost, Some(320));
    assert_eq!(repaired.repaired_at, Some(datetime!(2024-06-04 12:00 UTC)));
}

#[test]
fn test_reported_can_be_repaired_directly() {
    let transition: BreakdownTransition =
        update(&create_report(), BreakdownStatus::Repaired, None).unwrap();

    assert!(transition.report.repaired_at.is_some());
}

#[test]
fn test_closed_report_cannot_move() {
    let cancelled: BreakdownReport = update(&create_report(), BreakdownStatus::Cancelled, None)
        .unwrap()
        .report;

    let err: CoreError = update(&cancelled, BreakdownStatus::InRepair, None).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InvalidStatusTransition { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_negative_repair_cost_is_rejected() {
    let err: CoreError = update(&create_report(), BreakdownStatus::Repaired, Some(-1)).unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::InvalidRepairCost { cost: -1 })
    );
}

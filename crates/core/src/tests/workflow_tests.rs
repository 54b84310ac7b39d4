// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_DRIVER, create_closed_day, create_open_day, create_test_actor, create_test_cause,
    create_test_date, create_test_now,
};
use crate::{
    CoreError, DecisionResult, LedgerEvent, ShiftDay, SubmissionResult, decide_modification,
    submit_modification,
};
use taxi_ledger_domain::{
    BreakdownOrigin, DomainError, ErrorKind, FieldValue, ModificationRequest, ModificationStatus,
    RawFields, Severity, ShiftSide,
};
use time::macros::datetime;

fn proposal(entries: &[(&str, FieldValue)]) -> RawFields {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

fn submit_realized_change(day: &ShiftDay, realized: i64) -> ModificationRequest {
    submit_modification(
        day,
        ShiftSide::CheckOut,
        "counted cash incorrectly",
        &proposal(&[("realized", FieldValue::Amount(realized))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .request
}

fn decide(
    request: &ModificationRequest,
    day: &ShiftDay,
    approve: bool,
) -> Result<DecisionResult, CoreError> {
    decide_modification(
        request,
        day,
        approve,
        " verified ",
        1,
        datetime!(2024-06-02 09:00 UTC),
        create_test_actor(),
        create_test_cause(),
    )
}

#[test]
fn test_submit_captures_original_values() {
    let day: ShiftDay = create_closed_day(48_000);

    let result: SubmissionResult = submit_modification(
        &day,
        ShiftSide::CheckOut,
        "counted cash incorrectly",
        &proposal(&[("realized", FieldValue::Amount(52_000))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.request.status, ModificationStatus::Pending);
    assert_eq!(result.request.driver_id, TEST_DRIVER);
    assert_eq!(result.request.shift_date, create_test_date());
    assert_eq!(
        result.request.original,
        proposal(&[("realized", FieldValue::Amount(48_000))])
    );
    assert_eq!(result.request.decided_at, None);
    assert_eq!(result.audit_event.action.name, "SubmitModification");
}

#[test]
fn test_submit_against_missing_side_is_no_such_shift_side() {
    let err: CoreError = submit_modification(
        &create_open_day(),
        ShiftSide::CheckOut,
        "typo",
        &proposal(&[("realized", FieldValue::Amount(1))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::NoSuchShiftSide {
            side: ShiftSide::CheckOut,
            ..
        })
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_submit_rejects_field_of_other_side() {
    let err: CoreError = submit_modification(
        &create_closed_day(48_000),
        ShiftSide::CheckOut,
        "wrong target",
        &proposal(&[("target", FieldValue::Amount(1))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::UnknownField { .. })
    ));
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_submit_rejects_type_mismatch() {
    let err: CoreError = submit_modification(
        &create_closed_day(48_000),
        ShiftSide::CheckOut,
        "typo",
        &proposal(&[("realized", FieldValue::Text(String::from("lots")))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::FieldTypeMismatch { .. })
    ));
}

#[test]
fn test_submit_requires_justification() {
    let err: CoreError = submit_modification(
        &create_closed_day(48_000),
        ShiftSide::CheckOut,
        "  ",
        &proposal(&[("realized", FieldValue::Amount(1))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::MissingJustification)
    );
}

#[test]
fn test_approve_patches_live_record() {
    let day: ShiftDay = create_closed_day(48_000);
    let request: ModificationRequest = submit_realized_change(&day, 52_000);

    let result: DecisionResult = decide(&request, &day, true).unwrap();

    assert_eq!(result.request.status, ModificationStatus::Approved);
    assert_eq!(result.request.reviewer_account_id, Some(1));
    assert_eq!(result.request.admin_comment, "verified");
    assert_eq!(
        result.request.decided_at,
        Some(datetime!(2024-06-02 09:00 UTC))
    );
    let new_day: ShiftDay = result.new_day.unwrap();
    assert_eq!(new_day.check_out.unwrap().realized, 52_000);
    assert!(result.events.is_empty());
    assert_eq!(result.audit_event.action.name, "ApproveModification");
}

#[test]
fn test_reject_leaves_ledger_untouched() {
    let day: ShiftDay = create_closed_day(48_000);
    let request: ModificationRequest = submit_realized_change(&day, 52_000);

    let result: DecisionResult = decide(&request, &day, false).unwrap();

    assert_eq!(result.request.status, ModificationStatus::Rejected);
    assert!(result.new_day.is_none());
    assert!(result.request.decided_at.is_some());
    assert_eq!(result.audit_event.action.name, "RejectModification");
}

#[test]
fn test_second_decision_is_already_decided() {
    let day: ShiftDay = create_closed_day(48_000);
    let request: ModificationRequest = submit_realized_change(&day, 52_000);

    for first in [true, false] {
        let decided: ModificationRequest = decide(&request, &day, first).unwrap().request;
        for second in [true, false] {
            let err: CoreError = decide(&decided, &day, second).unwrap_err();
            assert!(matches!(
                err,
                CoreError::DomainViolation(DomainError::AlreadyDecided { .. })
            ));
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }
}

#[test]
fn test_approved_issue_note_emits_moderate_report() {
    let day: ShiftDay = create_open_day();
    let request: ModificationRequest = submit_modification(
        &day,
        ShiftSide::CheckIn,
        "forgot to mention",
        &proposal(&[(
            "issue_note",
            FieldValue::Text(String::from("warning light on")),
        )]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .request;

    let result: DecisionResult = decide(&request, &day, true).unwrap();

    assert_eq!(result.events.len(), 1);
    let LedgerEvent::IssueReported(event) = &result.events[0];
    assert_eq!(event.severity, Severity::Moderate);
    assert_eq!(event.origin, BreakdownOrigin::Modification);
    assert_eq!(event.note.value(), "warning light on");
    assert_eq!(
        result.new_day.unwrap().check_in.unwrap().issue_note.value(),
        "warning light on"
    );
}

#[test]
fn test_rejected_issue_note_emits_nothing() {
    let day: ShiftDay = create_open_day();
    let request: ModificationRequest = submit_modification(
        &day,
        ShiftSide::CheckIn,
        "forgot to mention",
        &proposal(&[("issue_note", FieldValue::Text(String::from("dent")))]),
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .request;

    let result: DecisionResult = decide(&request, &day, false).unwrap();

    assert!(result.events.is_empty());
}

#[test]
fn test_invalid_stored_proposal_is_a_dependency_failure() {
    let day: ShiftDay = create_closed_day(48_000);
    let mut request: ModificationRequest = submit_realized_change(&day, 52_000);
    request.proposed = proposal(&[("realized", FieldValue::Text(String::from("oops")))]);

    let err: CoreError = decide(&request, &day, true).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::PatchRejected { ref field, .. })
            if field == "realized"
    ));
    assert_eq!(err.kind(), ErrorKind::Dependency);
    assert_eq!(request.status, ModificationStatus::Pending);
}

#[test]
fn test_rejection_does_not_revalidate_proposal() {
    let day: ShiftDay = create_closed_day(48_000);
    let mut request: ModificationRequest = submit_realized_change(&day, 52_000);
    request.proposed = proposal(&[("bogus", FieldValue::Flag(true))]);

    let result: DecisionResult = decide(&request, &day, false).unwrap();

    assert_eq!(result.request.status, ModificationStatus::Rejected);
}

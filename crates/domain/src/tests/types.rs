// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{
    BreakdownOrigin, BreakdownStatus, Driver, IssueNote, Severity, ShiftSide, ShiftState,
};

#[test]
fn test_issue_note_none_sentinel_is_case_insensitive() {
    assert!(!IssueNote::new("none").is_reported());
    assert!(!IssueNote::new("NONE").is_reported());
    assert!(!IssueNote::new("  None  ").is_reported());
}

#[test]
fn test_blank_issue_note_becomes_none() {
    let note: IssueNote = IssueNote::new("   ");
    assert_eq!(note.value(), "none");
    assert!(!note.is_reported());
}

#[test]
fn test_issue_note_is_trimmed_and_reported() {
    let note: IssueNote = IssueNote::new("  brake noise ");
    assert_eq!(note.value(), "brake noise");
    assert!(note.is_reported());
}

#[test]
fn test_shift_state_derivation() {
    assert_eq!(ShiftState::derive(false, false), ShiftState::None);
    assert_eq!(ShiftState::derive(true, false), ShiftState::Open);
    assert_eq!(ShiftState::derive(true, true), ShiftState::Closed);
    // A stray check-out without a check-in is not a shift.
    assert_eq!(ShiftState::derive(false, true), ShiftState::None);
}

#[test]
fn test_shift_side_parses_persisted_form() {
    assert_eq!(ShiftSide::from_str("check_in").unwrap(), ShiftSide::CheckIn);
    assert_eq!(ShiftSide::from_str("check_out").unwrap(), ShiftSide::CheckOut);
    assert!(ShiftSide::from_str("checkin").is_err());
    assert_eq!(ShiftSide::CheckOut.to_string(), "check-out");
}

#[test]
fn test_breakdown_enums_parse_persisted_form() {
    assert_eq!(Severity::from_str("moderate").unwrap(), Severity::Moderate);
    assert!(Severity::from_str("moyenne").is_err());
    assert_eq!(
        BreakdownStatus::from_str("in_repair").unwrap(),
        BreakdownStatus::InRepair
    );
    assert_eq!(
        BreakdownOrigin::from_str(BreakdownOrigin::Modification.as_str()).unwrap(),
        BreakdownOrigin::Modification
    );
}

#[test]
fn test_breakdown_repair_lifecycle() {
    assert!(
        BreakdownStatus::Reported
            .validate_transition(BreakdownStatus::InRepair)
            .is_ok()
    );
    assert!(
        BreakdownStatus::InRepair
            .validate_transition(BreakdownStatus::Repaired)
            .is_ok()
    );
    assert!(
        BreakdownStatus::InRepair
            .validate_transition(BreakdownStatus::Reported)
            .is_err()
    );
    assert!(
        BreakdownStatus::Repaired
            .validate_transition(BreakdownStatus::Cancelled)
            .is_err()
    );
    assert!(
        BreakdownStatus::Cancelled
            .validate_transition(BreakdownStatus::InRepair)
            .is_err()
    );
}

#[test]
fn test_driver_full_name() {
    let driver: Driver = Driver::new(
        String::from("Jean"),
        String::from("Mba"),
        String::from("+241061234567"),
        String::from("jean@example.com"),
    );
    assert_eq!(driver.full_name(), "Jean Mba");
    assert!(driver.active);
    assert!(driver.driver_id.is_none());
}

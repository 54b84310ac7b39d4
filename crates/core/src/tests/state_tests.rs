// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_DRIVER, create_close_command, create_closed_day, create_open_day, create_test_actor,
    create_test_cause, create_test_date,
};
use crate::{ShiftDay, ShiftSummary, apply};
use taxi_ledger_domain::{Reconciliation, ShiftState, Tier};
use time::Duration;
use time::macros::time;

#[test]
fn test_empty_day_state_is_none() {
    let day: ShiftDay = ShiftDay::new(TEST_DRIVER, create_test_date());

    assert_eq!(day.state(), ShiftState::None);
    assert_eq!(day.reconcile(), None);
    assert_eq!(day.work_duration(), None);
}

#[test]
fn test_open_day_has_no_reconciliation() {
    let day: ShiftDay = create_open_day();

    assert_eq!(day.state(), ShiftState::Open);
    assert_eq!(day.reconcile(), None);
}

#[test]
fn test_closed_day_reconciles_as_warning() {
    let day: ShiftDay = create_closed_day(48_000);

    let reconciliation: Reconciliation = day.reconcile().unwrap();
    assert_eq!(reconciliation.tier, Tier::Warning);
    assert!((reconciliation.percentage.unwrap() - 96.0).abs() < 1e-9);
    assert!(reconciliation.message.to_lowercase().contains("almost there"));
}

#[test]
fn test_check_out_without_check_in_is_unknown() {
    let mut day: ShiftDay = create_closed_day(48_000);
    day.check_in = None;

    assert_eq!(day.state(), ShiftState::None);
    assert_eq!(day.reconcile().unwrap().tier, Tier::Unknown);
}

#[test]
fn test_work_duration_same_day() {
    let day: ShiftDay = create_closed_day(48_000);

    assert_eq!(day.work_duration(), Some(Duration::minutes(10 * 60 + 30)));
}

#[test]
fn test_work_duration_crossing_midnight() {
    let day: ShiftDay = apply(
        &create_open_day(),
        create_close_command(time!(1:15), 30_000),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_day;

    assert_eq!(day.work_duration(), Some(Duration::minutes(17 * 60 + 15)));
}

#[test]
fn test_summary_collects_figures() {
    let summary: ShiftSummary = create_closed_day(55_000).summary();

    assert_eq!(summary.state, ShiftState::Closed);
    assert_eq!(summary.target, Some(50_000));
    assert_eq!(summary.realized, Some(55_000));
    assert_eq!(summary.reconciliation.unwrap().tier, Tier::Success);
    assert_eq!(summary.work_minutes, Some(630));
}

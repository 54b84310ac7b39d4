// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    create_test_check_in, create_test_check_out, create_test_date, create_test_driver,
    create_test_persistence,
};
use crate::{Persistence, PersistenceError, ShiftFilter};
use taxi_ledger::ShiftDay;
use taxi_ledger_domain::{IssueNote, ShiftState};
use time::macros::{date, time};

#[test]
fn test_empty_day_loads_as_not_started() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");

    let day: ShiftDay = persistence
        .load_shift_day(driver_id, create_test_date())
        .unwrap();

    assert_eq!(day.state(), ShiftState::None);
}

#[test]
fn test_check_in_round_trips() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");
    let mut check_in = create_test_check_in(driver_id, create_test_date(), 50_000);
    check_in.issue_note = IssueNote::new("Left mirror cracked");

    let id: i64 = persistence.insert_check_in(&check_in).unwrap();
    let day: ShiftDay = persistence
        .load_shift_day(driver_id, create_test_date())
        .unwrap();

    let stored = day.check_in.unwrap();
    assert_eq!(stored.check_in_id, Some(id));
    assert_eq!(stored.time_of_day, time!(8:00));
    assert_eq!(stored.target, 50_000);
    assert_eq!(stored.issue_note.value(), "Left mirror cracked");
    assert_eq!(day.check_out, None);
}

#[test]
fn test_second_check_in_same_day_is_unique_violation() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");
    let check_in = create_test_check_in(driver_id, create_test_date(), 50_000);

    persistence.insert_check_in(&check_in).unwrap();
    let result: Result<i64, PersistenceError> = persistence.insert_check_in(&check_in);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_check_out_without_check_in_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");
    let check_out = create_test_check_out(driver_id, create_test_date(), 48_000);

    let result: Result<i64, PersistenceError> = persistence.insert_check_out(&check_out);

    assert!(matches!(result, Err(PersistenceError::ForeignKeyViolation(_))));
}

#[test]
fn test_update_check_out_rewrites_editable_columns() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");
    persistence
        .insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))
        .unwrap();
    let mut check_out = create_test_check_out(driver_id, create_test_date(), 48_000);
    check_out.check_out_id = Some(persistence.insert_check_out(&check_out).unwrap());

    check_out.realized = 52_000;
    check_out.fuel_full = true;
    persistence.update_check_out(&check_out).unwrap();

    let day: ShiftDay = persistence
        .load_shift_day(driver_id, create_test_date())
        .unwrap();
    let stored = day.check_out.unwrap();
    assert_eq!(stored.realized, 52_000);
    assert!(stored.fuel_full);
}

#[test]
fn test_update_without_identifier_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let check_in = create_test_check_in(1, create_test_date(), 50_000);

    let result: Result<(), PersistenceError> = persistence.update_check_in(&check_in);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_list_shift_days_pairs_sides_and_filters() {
    let mut persistence: Persistence = create_test_persistence();
    let first: i64 = create_test_driver(&mut persistence, "Martin");
    let second: i64 = create_test_driver(&mut persistence, "Bernard");

    for (driver_id, shift_date) in [
        (first, date!(2024 - 05 - 30)),
        (first, date!(2024 - 05 - 31)),
        (second, date!(2024 - 05 - 31)),
    ] {
        persistence
            .insert_check_in(&create_test_check_in(driver_id, shift_date, 40_000))
            .unwrap();
    }
    persistence
        .insert_check_out(&create_test_check_out(first, date!(2024 - 05 - 31), 41_000))
        .unwrap();

    let all: Vec<ShiftDay> = persistence.list_shift_days(&ShiftFilter::default()).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].shift_date, date!(2024 - 05 - 31));
    assert_eq!(all[0].driver_id, first);
    assert_eq!(all[0].state(), ShiftState::Closed);
    assert_eq!(all[2].shift_date, date!(2024 - 05 - 30));

    let filtered: Vec<ShiftDay> = persistence
        .list_shift_days(&ShiftFilter {
            driver_ids: Some(vec![second]),
            from: Some(date!(2024 - 05 - 31)),
            to: None,
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].driver_id, second);

    let nothing: Vec<ShiftDay> = persistence
        .list_shift_days(&ShiftFilter {
            driver_ids: Some(Vec::new()),
            ..ShiftFilter::default()
        })
        .unwrap();
    assert!(nothing.is_empty());
}

#[test]
fn test_deleting_driver_removes_shift_records() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");
    persistence
        .insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))
        .unwrap();
    persistence
        .insert_check_out(&create_test_check_out(driver_id, create_test_date(), 50_000))
        .unwrap();

    persistence.delete_driver(driver_id).unwrap();

    assert!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().is_empty());
    assert!(persistence.list_check_outs(&ShiftFilter::default()).unwrap().is_empty());
}

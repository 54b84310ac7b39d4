// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_check_in, create_test_date, create_test_driver, create_test_persistence};
use crate::{Persistence, PersistenceError, ShiftFilter};
use std::panic::{self, AssertUnwindSafe};

#[test]
fn test_transaction_commits_on_success() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");

    let result: Result<i64, PersistenceError> = persistence.transaction(|tx| {
        tx.insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))
    });

    assert!(result.is_ok());
    assert_eq!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().len(), 1);
}

#[test]
fn test_transaction_rolls_back_on_error() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");

    let result: Result<(), PersistenceError> = persistence.transaction(|tx| {
        tx.insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))?;
        tx.update_driver_active(driver_id, false)?;
        Err(PersistenceError::QueryFailed(String::from("forced")))
    });

    assert!(result.is_err());
    assert!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().is_empty());
    assert!(persistence.get_driver(driver_id).unwrap().unwrap().active);
}

#[test]
fn test_nested_failure_only_undoes_inner_work() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");

    let result: Result<(), PersistenceError> = persistence.transaction(|tx| {
        tx.update_driver_active(driver_id, false)?;
        let inner: Result<(), PersistenceError> = tx.transaction(|inner| {
            inner.insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))?;
            Err(PersistenceError::QueryFailed(String::from("forced")))
        });
        assert!(inner.is_err());
        Ok(())
    });

    assert!(result.is_ok());
    assert!(!persistence.get_driver(driver_id).unwrap().unwrap().active);
    assert!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().is_empty());
}

#[test]
fn test_panic_inside_transaction_rolls_back() {
    let mut persistence: Persistence = create_test_persistence();
    let driver_id: i64 = create_test_driver(&mut persistence, "Martin");

    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        let _: Result<(), PersistenceError> = persistence.transaction(|tx| {
            tx.insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))?;
            panic!("writer crashed mid-transaction");
        });
    }));

    assert!(unwound.is_err());
    assert!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().is_empty());

    let retry: Result<i64, PersistenceError> = persistence.transaction(|tx| {
        tx.insert_check_in(&create_test_check_in(driver_id, create_test_date(), 50_000))
    });
    assert!(retry.is_ok());
    assert_eq!(persistence.list_check_ins(&ShiftFilter::default()).unwrap().len(), 1);
}

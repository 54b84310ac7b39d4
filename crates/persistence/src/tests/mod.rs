// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;
mod shift_tests;
mod transaction_tests;

use crate::{NewAccount, Persistence};
use std::collections::BTreeSet;
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{CheckIn, CheckOut, Driver, IssueNote, SUPERVISOR_GROUP};
use time::macros::{date, datetime, time};
use time::{Date, OffsetDateTime};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_actor() -> Actor {
    Actor::with_account(String::from("acct-1"), String::from("admin"), 1)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 01)
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-06-01 06:00 UTC)
}

pub fn create_test_driver(persistence: &mut Persistence, last_name: &str) -> i64 {
    let driver: Driver = Driver::new(
        String::from("Test"),
        last_name.to_string(),
        String::from("+33 6 12 34 56 78"),
        format!("{}@example.com", last_name.to_lowercase()),
    );
    persistence.insert_driver(&driver).unwrap()
}

pub fn create_test_supervisor(persistence: &mut Persistence, login: &str) -> i64 {
    let account: NewAccount = NewAccount {
        login_name: login.to_string(),
        display_name: login.to_uppercase(),
        groups: BTreeSet::from([String::from(SUPERVISOR_GROUP)]),
        ..NewAccount::default()
    };
    persistence.insert_account(&account).unwrap()
}

pub fn create_test_check_in(driver_id: i64, shift_date: Date, target: i64) -> CheckIn {
    CheckIn {
        check_in_id: None,
        driver_id,
        shift_date,
        time_of_day: time!(8:00),
        target,
        fuel_full: true,
        issue_note: IssueNote::none(),
        signature: String::from("sig-in"),
        created_at: create_test_now(),
    }
}

pub fn create_test_check_out(driver_id: i64, shift_date: Date, realized: i64) -> CheckOut {
    CheckOut {
        check_out_id: None,
        driver_id,
        shift_date,
        time_of_day: time!(18:30),
        realized,
        fuel_full: false,
        issue_note: IssueNote::none(),
        signature: String::from("sig-out"),
        created_at: create_test_now(),
    }
}

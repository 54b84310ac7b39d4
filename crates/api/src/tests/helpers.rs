// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use std::collections::BTreeSet;
use taxi_ledger::IssueReported;
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{BusinessClock, CheckIn, Driver, NO_ISSUE, Principal, SUPERVISOR_GROUP};
use taxi_ledger_persistence::{NewAccount, Persistence};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{
    ApiError, BreakdownRegister, CloseShiftRequest, IssueSink, OpenShiftRequest, Outcome,
    create_account, load_principal, open_shift, register_driver,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_clock() -> BusinessClock {
    BusinessClock::default()
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test operation"))
}

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 01)
}

/// 08:00 in Paris on the test date.
pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-06-01 06:00 UTC)
}

/// Bootstraps the first administrator directly through storage.
pub fn create_test_admin(persistence: &mut Persistence) -> Principal {
    let account: NewAccount = NewAccount {
        login_name: String::from("root"),
        display_name: String::from("Root"),
        is_super_admin: true,
        ..NewAccount::default()
    };
    let account_id: i64 = persistence.insert_account(&account).unwrap();
    load_principal(persistence, account_id).unwrap()
}

pub fn create_test_account(
    persistence: &mut Persistence,
    admin: &Principal,
    account: NewAccount,
) -> Principal {
    let account_id: i64 =
        create_account(persistence, admin, account, create_test_cause()).unwrap();
    load_principal(persistence, account_id).unwrap()
}

/// Registers a driver with a linked account and returns the driver's principal.
pub fn create_test_driver(
    persistence: &mut Persistence,
    admin: &Principal,
    last_name: &str,
) -> Principal {
    create_linked_driver(persistence, admin, last_name, false)
}

/// Registers a driver whose account carries the staff flag.
pub fn create_test_elevated_driver(
    persistence: &mut Persistence,
    admin: &Principal,
    last_name: &str,
) -> Principal {
    create_linked_driver(persistence, admin, last_name, true)
}

fn create_linked_driver(
    persistence: &mut Persistence,
    admin: &Principal,
    last_name: &str,
    has_staff_flag: bool,
) -> Principal {
    let driver: Driver = register_driver(
        persistence,
        admin,
        "Test",
        last_name,
        "+33612345678",
        &format!("{}@example.com", last_name.to_lowercase()),
        create_test_cause(),
    )
    .unwrap();

    let account: NewAccount = NewAccount {
        login_name: last_name.to_lowercase(),
        display_name: format!("Test {last_name}"),
        has_staff_flag,
        driver_id: driver.driver_id,
        ..NewAccount::default()
    };
    create_test_account(persistence, admin, account)
}

pub fn create_test_supervisor(
    persistence: &mut Persistence,
    admin: &Principal,
    login: &str,
) -> Principal {
    let account: NewAccount = NewAccount {
        login_name: login.to_string(),
        display_name: login.to_uppercase(),
        groups: BTreeSet::from([String::from(SUPERVISOR_GROUP)]),
        ..NewAccount::default()
    };
    create_test_account(persistence, admin, account)
}

pub fn driver_id_of(principal: &Principal) -> i64 {
    principal.linked_driver_id().unwrap()
}

pub fn create_open_request(shift_date: Date, target: i64, issue_note: &str) -> OpenShiftRequest {
    OpenShiftRequest {
        shift_date,
        target,
        fuel_full: true,
        issue_note: issue_note.to_string(),
        signature: String::from("sig-in"),
    }
}

pub fn create_close_request(
    shift_date: Date,
    realized: i64,
    issue_note: &str,
) -> CloseShiftRequest {
    CloseShiftRequest {
        shift_date,
        realized,
        fuel_full: false,
        issue_note: issue_note.to_string(),
        signature: String::from("sig-out"),
    }
}

/// Opens a shift on the test date with no issue to report.
pub fn open_test_shift(
    persistence: &mut Persistence,
    driver: &Principal,
    target: i64,
) -> Outcome<CheckIn> {
    open_shift(
        persistence,
        &create_test_clock(),
        &mut BreakdownRegister,
        driver,
        create_open_request(create_test_date(), target, NO_ISSUE),
        create_test_now(),
        create_test_cause(),
    )
    .unwrap()
}

/// A sink that always fails, standing in for an unavailable register.
pub struct FailingSink;

impl IssueSink for FailingSink {
    fn issue_reported(
        &mut self,
        _persistence: &mut Persistence,
        _event: &IssueReported,
        _actor: &Actor,
        _cause: &Cause,
        _now: OffsetDateTime,
    ) -> Result<i64, ApiError> {
        Err(ApiError::Dependency {
            message: String::from("breakdown register unavailable"),
        })
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, ShiftDay, apply};
use std::collections::BTreeSet;
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{Principal, SUPERVISOR_GROUP};
use time::macros::{date, datetime, time};
use time::{Date, OffsetDateTime, Time};

pub const TEST_DRIVER: i64 = 7;

pub fn create_test_actor() -> Actor {
    Actor::with_account(String::from("acct-7"), String::from("driver"), 70)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Driver request"))
}

pub fn create_test_date() -> Date {
    date!(2024 - 06 - 01)
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2024-06-01 06:00 UTC)
}

pub fn create_open_command(target: i64, issue_note: &str) -> Command {
    Command::OpenShift {
        time_of_day: time!(8:00),
        target,
        fuel_full: true,
        issue_note: issue_note.to_string(),
        signature: String::from("sig1"),
        recorded_at: create_test_now(),
    }
}

pub fn create_close_command(time_of_day: Time, realized: i64) -> Command {
    Command::CloseShift {
        time_of_day,
        realized,
        fuel_full: false,
        issue_note: String::from("none"),
        signature: String::from("sig2"),
        recorded_at: create_test_now(),
    }
}

pub fn create_open_day() -> ShiftDay {
    let day: ShiftDay = ShiftDay::new(TEST_DRIVER, create_test_date());
    apply(
        &day,
        create_open_command(50_000, "none"),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_day
}

pub fn create_closed_day(realized: i64) -> ShiftDay {
    apply(
        &create_open_day(),
        create_close_command(time!(18:30), realized),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
    .new_day
}

pub fn create_test_supervisor(account_id: i64) -> Principal {
    Principal::new(
        account_id,
        false,
        false,
        BTreeSet::from([SUPERVISOR_GROUP.to_string()]),
        None,
        false,
    )
}

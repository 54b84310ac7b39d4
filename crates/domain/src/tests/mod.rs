// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod eligibility;
mod principal;
mod types;

use time::{Date, Month, OffsetDateTime, Time};

use crate::{CheckIn, CheckOut, IssueNote};

pub fn create_test_date() -> Date {
    Date::from_calendar_date(2024, Month::June, 1).unwrap()
}

pub fn create_test_check_in(target: i64) -> CheckIn {
    CheckIn {
        check_in_id: Some(1),
        driver_id: 7,
        shift_date: create_test_date(),
        time_of_day: Time::from_hms(6, 30, 0).unwrap(),
        target,
        fuel_full: true,
        issue_note: IssueNote::none(),
        signature: String::from("sig1"),
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

pub fn create_test_check_out(realized: i64) -> CheckOut {
    CheckOut {
        check_out_id: Some(1),
        driver_id: 7,
        shift_date: create_test_date(),
        time_of_day: Time::from_hms(19, 0, 0).unwrap(),
        realized,
        fuel_full: false,
        issue_note: IssueNote::none(),
        signature: String::from("sig2"),
        created_at: OffsetDateTime::UNIX_EPOCH,
    }
}

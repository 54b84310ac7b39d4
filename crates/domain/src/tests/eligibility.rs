// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::macros::datetime;
use time::{Date, Month};

use crate::{
    BusinessClock, DEFAULT_DAY_START_HOUR, DayEligibility, DomainError, LocalMoment, ShiftState,
    day_eligibility,
};

#[test]
fn test_cannot_open_before_day_start() {
    let result: DayEligibility = day_eligibility(ShiftState::None, 2, DEFAULT_DAY_START_HOUR);
    assert!(!result.can_open);
    assert!(!result.can_close);

    let result: DayEligibility = day_eligibility(ShiftState::None, 3, DEFAULT_DAY_START_HOUR);
    assert!(result.can_open);
}

#[test]
fn test_open_shift_can_only_close() {
    let result: DayEligibility = day_eligibility(ShiftState::Open, 8, DEFAULT_DAY_START_HOUR);
    assert_eq!(
        result,
        DayEligibility {
            can_open: false,
            can_close: true,
        }
    );
}

#[test]
fn test_closed_shift_can_do_nothing() {
    let result: DayEligibility = day_eligibility(ShiftState::Closed, 20, DEFAULT_DAY_START_HOUR);
    assert!(!result.can_open);
    assert!(!result.can_close);
}

#[test]
fn test_clock_converts_to_local_time() {
    let clock: BusinessClock = BusinessClock::new("Europe/Paris", 3).unwrap();
    // Paris is UTC+2 in June.
    let local: LocalMoment = clock.local(datetime!(2024-06-01 06:00 UTC)).unwrap();
    assert_eq!(
        local.date,
        Date::from_calendar_date(2024, Month::June, 1).unwrap()
    );
    assert_eq!(local.time.hour(), 8);
}

#[test]
fn test_clock_crosses_midnight_into_local_date() {
    let clock: BusinessClock = BusinessClock::new("Europe/Paris", 3).unwrap();
    let local: LocalMoment = clock.local(datetime!(2024-06-01 23:30 UTC)).unwrap();
    assert_eq!(
        local.date,
        Date::from_calendar_date(2024, Month::June, 2).unwrap()
    );
    assert_eq!(local.time.hour(), 1);

    let eligibility: DayEligibility = clock
        .eligibility(ShiftState::None, datetime!(2024-06-01 23:30 UTC))
        .unwrap();
    assert!(!eligibility.can_open);
}

#[test]
fn test_clock_rejects_bad_configuration() {
    assert!(matches!(
        BusinessClock::new("Mars/Olympus", 3),
        Err(DomainError::InvalidTimezone(_))
    ));
    assert!(matches!(
        BusinessClock::new("UTC", 24),
        Err(DomainError::InvalidDayStartHour(24))
    ));
}

#[test]
fn test_default_clock() {
    let clock: BusinessClock = BusinessClock::default();
    assert_eq!(clock.day_start_hour(), 3);
    assert_eq!(clock.timezone_name(), "Europe/Paris");
}

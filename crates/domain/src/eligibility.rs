// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local business clock and day eligibility.
//!
//! A working day only opens once the local clock passes the configured
//! start hour, so a shift ending after midnight is never mistaken for the
//! next day's shift.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime, Time};

use crate::error::DomainError;
use crate::types::ShiftState;

/// Default local hour at which a new working day opens.
pub const DEFAULT_DAY_START_HOUR: u8 = 3;

/// Default IANA timezone of the fleet.
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

/// What a driver may do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEligibility {
    pub can_open: bool,
    pub can_close: bool,
}

/// Computes eligibility from today's shift state and the local hour.
#[must_use]
pub fn day_eligibility(state: ShiftState, local_hour: u8, day_start_hour: u8) -> DayEligibility {
    DayEligibility {
        can_open: state == ShiftState::None && local_hour >= day_start_hour,
        can_close: state == ShiftState::Open,
    }
}

/// A wall-clock instant in the fleet's timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMoment {
    pub date: Date,
    pub time: Time,
}

/// Converts UTC instants to the fleet's local date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessClock {
    timezone: Tz,
    day_start_hour: u8,
}

impl BusinessClock {
    /// Creates a clock for an IANA timezone name.
    ///
    /// # Errors
    ///
    /// * `InvalidDayStartHour` if the hour is not in `0..24`
    /// * `InvalidTimezone` if the name is not a known zone
    pub fn new(timezone: &str, day_start_hour: u8) -> Result<Self, DomainError> {
        if day_start_hour > 23 {
            return Err(DomainError::InvalidDayStartHour(day_start_hour));
        }
        let timezone: Tz = timezone
            .parse()
            .map_err(|_| DomainError::InvalidTimezone(timezone.to_string()))?;
        Ok(Self {
            timezone,
            day_start_hour,
        })
    }

    #[must_use]
    pub const fn day_start_hour(&self) -> u8 {
        self.day_start_hour
    }

    #[must_use]
    pub fn timezone_name(&self) -> &'static str {
        self.timezone.name()
    }

    /// Converts an instant to local wall-clock date and time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClockConversion` if the instant is out of range.
    pub fn local(&self, now: OffsetDateTime) -> Result<LocalMoment, DomainError> {
        let utc: DateTime<Utc> = DateTime::from_timestamp(now.unix_timestamp(), now.nanosecond())
            .ok_or_else(|| DomainError::ClockConversion(format!("{now} is out of range")))?;
        let local: DateTime<Tz> = utc.with_timezone(&self.timezone);

        let month: Month = u8::try_from(local.month())
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or_else(|| DomainError::ClockConversion(format!("bad month in {local}")))?;
        let day: u8 = u8::try_from(local.day())
            .map_err(|e| DomainError::ClockConversion(e.to_string()))?;
        let date: Date = Date::from_calendar_date(local.year(), month, day)
            .map_err(|e| DomainError::ClockConversion(e.to_string()))?;

        let hour: u8 =
            u8::try_from(local.hour()).map_err(|e| DomainError::ClockConversion(e.to_string()))?;
        let minute: u8 = u8::try_from(local.minute())
            .map_err(|e| DomainError::ClockConversion(e.to_string()))?;
        let second: u8 = u8::try_from(local.second())
            .map_err(|e| DomainError::ClockConversion(e.to_string()))?;
        let time: Time = Time::from_hms(hour, minute, second)
            .map_err(|e| DomainError::ClockConversion(e.to_string()))?;

        Ok(LocalMoment { date, time })
    }

    /// Computes eligibility for the local day containing `now`.
    ///
    /// `state` must be the driver's shift state for `self.local(now)?.date`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ClockConversion` if the instant is out of range.
    pub fn eligibility(
        &self,
        state: ShiftState,
        now: OffsetDateTime,
    ) -> Result<DayEligibility, DomainError> {
        let local: LocalMoment = self.local(now)?;
        Ok(day_eligibility(state, local.time.hour(), self.day_start_hour))
    }
}

impl Default for BusinessClock {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Paris,
            day_start_hour: DEFAULT_DAY_START_HOUR,
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use taxi_ledger_domain::{BreakdownStatus, DomainError, ModificationStatus, Severity};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, Time};

use crate::error::PersistenceError;

/// Stored account data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub account_id: i64,
    pub login_name: String,
    pub display_name: String,
    pub is_super_admin: bool,
    pub is_staff_admin: bool,
    pub has_staff_flag: bool,
    pub driver_id: Option<i64>,
    pub groups: BTreeSet<String>,
    pub created_at: String,
}

/// Data for provisioning a new account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccount {
    pub login_name: String,
    pub display_name: String,
    pub is_super_admin: bool,
    pub is_staff_admin: bool,
    pub has_staff_flag: bool,
    pub driver_id: Option<i64>,
    pub groups: BTreeSet<String>,
}

/// Filter for check-in and check-out listings.
///
/// `driver_ids: None` means unrestricted; `Some(empty)` matches nothing.
/// Date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFilter {
    pub driver_ids: Option<Vec<i64>>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

/// Filter for modification request listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFilter {
    pub driver_ids: Option<Vec<i64>>,
    pub status: Option<ModificationStatus>,
}

/// Filter for breakdown report listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakdownFilter {
    pub driver_ids: Option<Vec<i64>>,
    pub status: Option<BreakdownStatus>,
    pub severity: Option<Severity>,
}

pub(crate) fn format_date(date: Date) -> Result<String, PersistenceError> {
    Ok(date.format(format_description!("[year]-[month]-[day]"))?)
}

pub(crate) fn parse_date(text: &str) -> Result<Date, PersistenceError> {
    Ok(Date::parse(text, format_description!("[year]-[month]-[day]"))?)
}

pub(crate) fn format_time(time: Time) -> Result<String, PersistenceError> {
    Ok(time.format(format_description!("[hour]:[minute]:[second]"))?)
}

pub(crate) fn parse_time(text: &str) -> Result<Time, PersistenceError> {
    Ok(Time::parse(text, format_description!("[hour]:[minute]:[second]"))?)
}

pub(crate) fn format_timestamp(moment: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(moment.format(&Rfc3339)?)
}

pub(crate) fn parse_timestamp(text: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(text, &Rfc3339)?)
}

/// Parses a stored enum column.
pub(crate) fn parse_stored<T>(text: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(text).map_err(|e| PersistenceError::CorruptRecord(e.to_string()))
}

pub(crate) fn flag(value: bool) -> i32 {
    i32::from(value)
}

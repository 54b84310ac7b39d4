// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime, Time};

use crate::error::DomainError;

/// Sentinel stored when a shift reports no mechanical issue.
pub const NO_ISSUE: &str = "none";

/// A taxi driver.
///
/// Drivers are soft-disabled through `active`; their shift history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    /// The canonical identifier, if persisted.
    pub driver_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub active: bool,
}

impl Driver {
    /// Creates a new, active, not yet persisted driver.
    #[must_use]
    pub const fn new(first_name: String, last_name: String, phone: String, email: String) -> Self {
        Self {
            driver_id: None,
            first_name,
            last_name,
            phone,
            email,
            active: true,
        }
    }

    /// Returns the display name, first name first.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A free-text mechanical-issue note.
///
/// Empty text and any casing of `"none"` both mean no issue was reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueNote(String);

impl IssueNote {
    /// Creates a note from raw input, trimming surrounding whitespace.
    #[must_use]
    pub fn new(note: &str) -> Self {
        let trimmed: &str = note.trim();
        if trimmed.is_empty() {
            Self::none()
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The "no issue" note.
    #[must_use]
    pub fn none() -> Self {
        Self(NO_ISSUE.to_string())
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    /// Returns true if the note describes an actual issue.
    #[must_use]
    pub fn is_reported(&self) -> bool {
        !self.0.eq_ignore_ascii_case(NO_ISSUE)
    }
}

impl Default for IssueNote {
    fn default() -> Self {
        Self::none()
    }
}

/// The two halves of a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSide {
    /// Key handover at the start of the day.
    CheckIn,
    /// Key return at the end of the day.
    CheckOut,
}

impl ShiftSide {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
        }
    }
}

impl std::fmt::Display for ShiftSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckIn => write!(f, "check-in"),
            Self::CheckOut => write!(f, "check-out"),
        }
    }
}

impl FromStr for ShiftSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(Self::CheckIn),
            "check_out" => Ok(Self::CheckOut),
            _ => Err(DomainError::InvalidShiftSide(s.to_string())),
        }
    }
}

/// Derived state of a driver's day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftState {
    /// No check-in recorded.
    None,
    /// Checked in, not yet checked out.
    Open,
    /// Both halves recorded.
    Closed,
}

impl ShiftState {
    /// Derives the state from which halves exist.
    ///
    /// A check-out without a check-in is not a shift at all.
    #[must_use]
    pub const fn derive(has_check_in: bool, has_check_out: bool) -> Self {
        match (has_check_in, has_check_out) {
            (false, _) => Self::None,
            (true, false) => Self::Open,
            (true, true) => Self::Closed,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }
}

/// Start-of-day record: keys handed over, target declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    /// The canonical identifier, if persisted.
    pub check_in_id: Option<i64>,
    pub driver_id: i64,
    pub shift_date: Date,
    pub time_of_day: Time,
    /// Declared revenue target. Always greater than zero.
    pub target: i64,
    pub fuel_full: bool,
    pub issue_note: IssueNote,
    /// Opaque signature blob captured from the driver.
    pub signature: String,
    pub created_at: OffsetDateTime,
}

/// End-of-day record: keys returned, revenue realized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOut {
    /// The canonical identifier, if persisted.
    pub check_out_id: Option<i64>,
    pub driver_id: i64,
    pub shift_date: Date,
    pub time_of_day: Time,
    /// Realized revenue. Never negative.
    pub realized: i64,
    pub fuel_full: bool,
    pub issue_note: IssueNote,
    pub signature: String,
    pub created_at: OffsetDateTime,
}

/// A link granting a supervisor account visibility over one driver.
///
/// At most one edge exists per `(driver, supervisor)`; unassigning flips
/// `active` off and keeps the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentEdge {
    /// The canonical identifier, if persisted.
    pub edge_id: Option<i64>,
    pub driver_id: i64,
    pub supervisor_account_id: i64,
    pub active: bool,
    /// The administrator account that last activated the edge.
    pub created_by: Option<i64>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

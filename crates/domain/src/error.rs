// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

use crate::types::ShiftSide;

/// Coarse classification of domain failures.
///
/// Callers at the boundary decide how to present a failure from its kind
/// alone: validation and conflict failures are user-facing, authorization
/// failures short-circuit, dependency failures wrap collaborator faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape or range.
    Validation,
    /// The operation conflicts with the current ledger state.
    Conflict,
    /// The principal may not perform the operation.
    Authorization,
    /// A referenced entity does not exist.
    NotFound,
    /// A collaborator step (patch application, side effect) failed.
    Dependency,
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Declared revenue target must be strictly positive.
    InvalidTarget {
        /// The rejected target.
        target: i64,
    },
    /// Realized revenue must not be negative.
    InvalidRealized {
        /// The rejected amount.
        realized: i64,
    },
    /// A shift record was submitted without a signature.
    MissingSignature,
    /// A mechanical-issue note or breakdown description is invalid.
    InvalidIssueNote(String),
    /// A driver or account name is empty or invalid.
    InvalidName(String),
    /// An email address is malformed.
    InvalidEmail(String),
    /// A phone number is malformed.
    InvalidPhone(String),
    /// A login name is empty or invalid.
    InvalidLoginName(String),
    /// A modification request was submitted without a justification.
    MissingJustification,
    /// A repair cost is negative.
    InvalidRepairCost {
        /// The rejected cost.
        cost: i64,
    },
    /// A proposed field does not exist on the targeted shift side.
    UnknownField {
        /// The shift side being patched.
        side: ShiftSide,
        /// The rejected field name.
        field: String,
    },
    /// A proposed field value has the wrong type.
    FieldTypeMismatch {
        /// The field name.
        field: String,
        /// The expected value type.
        expected: &'static str,
    },
    /// A modification request proposes no fields.
    EmptyPatch,
    /// A check-in already exists for the driver and date.
    AlreadyOpen {
        /// The driver.
        driver_id: i64,
        /// The shift date.
        date: Date,
    },
    /// A check-out already exists for the driver and date.
    AlreadyClosed {
        /// The driver.
        driver_id: i64,
        /// The shift date.
        date: Date,
    },
    /// A check-out was attempted without a check-in.
    NoOpenShift {
        /// The driver.
        driver_id: i64,
        /// The shift date.
        date: Date,
    },
    /// The shift record targeted by a modification does not exist.
    NoSuchShiftSide {
        /// The driver.
        driver_id: i64,
        /// The targeted side.
        side: ShiftSide,
        /// The shift date.
        date: Date,
    },
    /// The modification request has already been decided.
    AlreadyDecided {
        /// The request identifier, if persisted.
        request_id: Option<i64>,
        /// The status the request is in.
        status: String,
    },
    /// A status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// A stored or submitted modification status is not recognized.
    InvalidModificationStatus(String),
    /// A stored or submitted shift side is not recognized.
    InvalidShiftSide(String),
    /// A stored or submitted severity is not recognized.
    InvalidSeverity(String),
    /// A stored or submitted breakdown status is not recognized.
    InvalidBreakdownStatus(String),
    /// A stored breakdown origin is not recognized.
    InvalidBreakdownOrigin(String),
    /// The driver has been deactivated.
    DriverInactive {
        /// The driver.
        driver_id: i64,
    },
    /// The account is not a member of the supervisor group.
    NotASupervisor {
        /// The account.
        account_id: i64,
    },
    /// Applying an approved patch to the live record failed.
    PatchRejected {
        /// The field being applied.
        field: String,
        /// Why it failed.
        reason: String,
    },
    /// The configured timezone is not a known IANA zone.
    InvalidTimezone(String),
    /// The configured day start hour is out of range.
    InvalidDayStartHour(u8),
    /// A timestamp could not be converted to local time.
    ClockConversion(String),
}

impl DomainError {
    /// Returns the error kind used for presentation and propagation.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTarget { .. }
            | Self::InvalidRealized { .. }
            | Self::MissingSignature
            | Self::InvalidIssueNote(_)
            | Self::InvalidName(_)
            | Self::InvalidEmail(_)
            | Self::InvalidPhone(_)
            | Self::InvalidLoginName(_)
            | Self::MissingJustification
            | Self::InvalidRepairCost { .. }
            | Self::UnknownField { .. }
            | Self::FieldTypeMismatch { .. }
            | Self::EmptyPatch
            | Self::InvalidModificationStatus(_)
            | Self::InvalidShiftSide(_)
            | Self::InvalidSeverity(_)
            | Self::InvalidBreakdownStatus(_)
            | Self::InvalidBreakdownOrigin(_)
            | Self::NotASupervisor { .. }
            | Self::InvalidTimezone(_)
            | Self::InvalidDayStartHour(_) => ErrorKind::Validation,
            Self::AlreadyOpen { .. }
            | Self::AlreadyClosed { .. }
            | Self::NoOpenShift { .. }
            | Self::NoSuchShiftSide { .. }
            | Self::AlreadyDecided { .. }
            | Self::InvalidStatusTransition { .. } => ErrorKind::Conflict,
            Self::DriverInactive { .. } => ErrorKind::Authorization,
            Self::PatchRejected { .. } | Self::ClockConversion(_) => ErrorKind::Dependency,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTarget { target } => {
                write!(f, "Revenue target must be greater than zero (got {target})")
            }
            Self::InvalidRealized { realized } => {
                write!(f, "Realized revenue cannot be negative (got {realized})")
            }
            Self::MissingSignature => write!(f, "A signature is required"),
            Self::InvalidIssueNote(msg) => write!(f, "Invalid issue note: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidLoginName(msg) => write!(f, "Invalid login name: {msg}"),
            Self::MissingJustification => {
                write!(f, "A justification is required for a modification request")
            }
            Self::InvalidRepairCost { cost } => {
                write!(f, "Repair cost cannot be negative (got {cost})")
            }
            Self::UnknownField { side, field } => {
                write!(f, "Field '{field}' cannot be modified on a {side}")
            }
            Self::FieldTypeMismatch { field, expected } => {
                write!(f, "Field '{field}' expects a {expected} value")
            }
            Self::EmptyPatch => write!(f, "A modification request must propose at least one field"),
            Self::AlreadyOpen { driver_id, date } => {
                write!(f, "Driver {driver_id} already checked in on {date}")
            }
            Self::AlreadyClosed { driver_id, date } => {
                write!(f, "Driver {driver_id} already checked out on {date}")
            }
            Self::NoOpenShift { driver_id, date } => {
                write!(
                    f,
                    "Driver {driver_id} has no check-in on {date}; check in before checking out"
                )
            }
            Self::NoSuchShiftSide {
                driver_id,
                side,
                date,
            } => {
                write!(f, "Driver {driver_id} has no {side} recorded on {date}")
            }
            Self::AlreadyDecided { request_id, status } => match request_id {
                Some(id) => write!(f, "Modification request {id} was already {status}"),
                None => write!(f, "Modification request was already {status}"),
            },
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move from '{from}' to '{to}': {reason}")
            }
            Self::InvalidModificationStatus(s) => write!(f, "Unknown modification status: {s}"),
            Self::InvalidShiftSide(s) => write!(f, "Unknown shift side: {s}"),
            Self::InvalidSeverity(s) => write!(f, "Unknown severity: {s}"),
            Self::InvalidBreakdownStatus(s) => write!(f, "Unknown breakdown status: {s}"),
            Self::InvalidBreakdownOrigin(s) => write!(f, "Unknown breakdown origin: {s}"),
            Self::DriverInactive { driver_id } => {
                write!(f, "Driver {driver_id} is deactivated")
            }
            Self::NotASupervisor { account_id } => {
                write!(f, "Account {account_id} is not a supervisor")
            }
            Self::PatchRejected { field, reason } => {
                write!(f, "Could not apply field '{field}': {reason}")
            }
            Self::InvalidTimezone(tz) => write!(f, "Unknown timezone: {tz}"),
            Self::InvalidDayStartHour(hour) => {
                write!(f, "Day start hour must be between 0 and 23 (got {hour})")
            }
            Self::ClockConversion(msg) => write!(f, "Clock conversion failed: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}

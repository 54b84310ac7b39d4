// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod breakdown;
mod eligibility;
mod error;
mod modification;
mod principal;
mod reconciliation;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use breakdown::{BreakdownOrigin, BreakdownReport, BreakdownStatus, Severity};
pub use eligibility::{
    BusinessClock, DEFAULT_DAY_START_HOUR, DEFAULT_TIMEZONE, DayEligibility, LocalMoment,
    day_eligibility,
};
pub use modification::{
    FieldName, FieldPatch, FieldValue, ModificationRequest, ModificationStatus, PatchTarget,
    RawFields,
};
pub use principal::{Principal, Role, SUPERVISOR_GROUP, Scope};
pub use reconciliation::{Reconciliation, Tier, classify};

// Re-export public types
pub use error::{DomainError, ErrorKind};
pub use types::{
    AssignmentEdge, CheckIn, CheckOut, Driver, IssueNote, NO_ISSUE, ShiftSide, ShiftState,
};
pub use validation::{
    MAX_ISSUE_NOTE_LEN, validate_account_fields, validate_driver_fields, validate_email,
    validate_issue_note, validate_justification, validate_phone, validate_realized,
    validate_repair_cost, validate_signature, validate_target,
};

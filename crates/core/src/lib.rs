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

mod apply;
mod assignment;
mod breakdown;
mod command;
mod error;
mod event;
mod registry;
mod state;
mod workflow;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use assignment::{apply_assignment, apply_unassignment};
pub use breakdown::{apply_breakdown_update, report_breakdown, report_from_event};
pub use command::Command;
pub use error::CoreError;
pub use event::{IssueReported, LedgerEvent};
pub use registry::{
    register_account, register_driver, remove_account, remove_driver, set_driver_active,
};
pub use state::{
    AssignmentTransition, BreakdownTransition, DecisionResult, DriverTransition, EdgeChange,
    ShiftDay, ShiftSummary, ShiftTransition, SubmissionResult,
};
pub use workflow::{decide_modification, submit_modification};

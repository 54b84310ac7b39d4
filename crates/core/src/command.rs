// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{OffsetDateTime, Time};

/// A ledger command represents driver intent as data only.
///
/// Commands are the only way to add records to a driver's day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Hand over the keys and declare the day's revenue target.
    OpenShift {
        /// Local wall-clock time of the handover.
        time_of_day: Time,
        /// Declared revenue target.
        target: i64,
        /// Whether the tank was full at handover.
        fuel_full: bool,
        /// Mechanical-issue note, `"none"` or blank when nothing to report.
        issue_note: String,
        /// Captured signature blob.
        signature: String,
        /// When the command was recorded.
        recorded_at: OffsetDateTime,
    },
    /// Return the keys and record the realized revenue.
    CloseShift {
        /// Local wall-clock time of the return.
        time_of_day: Time,
        /// Realized revenue.
        realized: i64,
        /// Whether the tank was full at return.
        fuel_full: bool,
        /// Mechanical-issue note, `"none"` or blank when nothing to report.
        issue_note: String,
        /// Captured signature blob.
        signature: String,
        /// When the command was recorded.
        recorded_at: OffsetDateTime,
    },
}

impl Command {
    /// Returns the audit action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenShift { .. } => "OpenShift",
            Self::CloseShift { .. } => "CloseShift",
        }
    }
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Breakdown (mechanical fault) register types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::error::DomainError;

/// How serious a reported fault is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Major,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Major => "major",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for Severity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minor" => Ok(Self::Minor),
            "moderate" => Ok(Self::Moderate),
            "major" => Ok(Self::Major),
            "critical" => Ok(Self::Critical),
            _ => Err(DomainError::InvalidSeverity(s.to_string())),
        }
    }
}

/// Repair progress of a reported fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownStatus {
    Reported,
    InRepair,
    Repaired,
    Cancelled,
}

impl BreakdownStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reported => "reported",
            Self::InRepair => "in_repair",
            Self::Repaired => "repaired",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the report is closed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Repaired | Self::Cancelled)
    }

    /// Validates a repair-progress transition.
    ///
    /// `reported -> in_repair -> repaired`, and any open report may be
    /// cancelled. A report may also be marked repaired directly.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` otherwise.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        let valid: bool = match self {
            Self::Reported => matches!(
                new_status,
                Self::InRepair | Self::Repaired | Self::Cancelled
            ),
            Self::InRepair => matches!(new_status, Self::Repaired | Self::Cancelled),
            Self::Repaired | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: if self.is_terminal() {
                    "the report is closed".to_string()
                } else {
                    "transition not permitted by repair lifecycle".to_string()
                },
            })
        }
    }
}

impl FromStr for BreakdownStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reported" => Ok(Self::Reported),
            "in_repair" => Ok(Self::InRepair),
            "repaired" => Ok(Self::Repaired),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBreakdownStatus(s.to_string())),
        }
    }
}

/// What produced a breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownOrigin {
    /// Issue note recorded at check-in.
    CheckIn,
    /// Issue note recorded at check-out.
    CheckOut,
    /// Issue note introduced by an approved modification.
    Modification,
    /// Reported directly by the driver.
    Manual,
}

impl BreakdownOrigin {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::Modification => "modification",
            Self::Manual => "manual",
        }
    }
}

impl FromStr for BreakdownOrigin {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(Self::CheckIn),
            "check_out" => Ok(Self::CheckOut),
            "modification" => Ok(Self::Modification),
            "manual" => Ok(Self::Manual),
            _ => Err(DomainError::InvalidBreakdownOrigin(s.to_string())),
        }
    }
}

/// A mechanical-issue record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownReport {
    /// The canonical identifier, if persisted.
    pub report_id: Option<i64>,
    pub driver_id: i64,
    /// The shift the issue was noticed on, when known.
    pub shift_date: Option<Date>,
    pub origin: BreakdownOrigin,
    pub description: String,
    pub severity: Severity,
    pub status: BreakdownStatus,
    /// Repair cost in whole currency units.
    pub repair_cost: Option<i64>,
    pub repaired_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

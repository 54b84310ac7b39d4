// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Retroactive shift corrections.
//!
//! A driver proposes new values for a handful of fields on one side of a
//! recorded shift. Each side exposes an explicit allow-list of patchable
//! fields through [`PatchTarget`]; anything outside it is rejected when the
//! proposal is parsed, never silently dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::{Date, OffsetDateTime};

use crate::error::DomainError;
use crate::types::{CheckIn, CheckOut, IssueNote, ShiftSide};
use crate::validation::{validate_issue_note, validate_realized, validate_target};

/// Lifecycle of a modification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModificationStatus {
    /// Awaiting an administrator decision.
    Pending,
    /// Approved and applied to the ledger.
    Approved,
    /// Rejected; the ledger is untouched.
    Rejected,
}

impl ModificationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns true if no further transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Validates a transition from this status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` for anything other than
    /// `Pending` to a terminal status.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "decided requests are immutable".to_string(),
            });
        }

        if new_status.is_terminal() {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "a pending request can only be approved or rejected".to_string(),
            })
        }
    }
}

impl FromStr for ModificationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidModificationStatus(s.to_string())),
        }
    }
}

/// A field that may be patched through the modification workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    Target,
    Realized,
    FuelFull,
    IssueNote,
}

impl FieldName {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Realized => "realized",
            Self::FuelFull => "fuel_full",
            Self::IssueNote => "issue_note",
        }
    }

    /// Resolves a raw key against the allow-list of one shift side.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownField` if the key is not patchable on `side`.
    pub fn for_side(side: ShiftSide, key: &str) -> Result<Self, DomainError> {
        let allowed: &[Self] = match side {
            ShiftSide::CheckIn => CheckIn::PATCHABLE,
            ShiftSide::CheckOut => CheckOut::PATCHABLE,
        };
        allowed
            .iter()
            .copied()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| DomainError::UnknownField {
                side,
                field: key.to_string(),
            })
    }
}

/// A proposed or captured field value.
///
/// Serialized as a bare JSON scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Amount(i64),
    Text(String),
}

impl FieldValue {
    const fn type_name(field: FieldName) -> &'static str {
        match field {
            FieldName::Target | FieldName::Realized => "integer",
            FieldName::FuelFull => "boolean",
            FieldName::IssueNote => "text",
        }
    }

    fn type_matches(&self, field: FieldName) -> bool {
        matches!(
            (field, self),
            (FieldName::Target | FieldName::Realized, Self::Amount(_))
                | (FieldName::FuelFull, Self::Flag(_))
                | (FieldName::IssueNote, Self::Text(_))
        )
    }
}

/// The per-side setter table used by the modification workflow.
pub trait PatchTarget {
    /// Which side of the shift this record is.
    const SIDE: ShiftSide;
    /// The fields that may be read and written through a patch.
    const PATCHABLE: &'static [FieldName];

    /// Reads the current value of an allow-listed field.
    fn read_field(&self, field: FieldName) -> Option<FieldValue>;

    /// Writes an allow-listed field.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PatchRejected` if the value cannot be applied.
    fn write_field(&mut self, field: FieldName, value: &FieldValue) -> Result<(), DomainError>;
}

fn rejected(field: FieldName, reason: impl Into<String>) -> DomainError {
    DomainError::PatchRejected {
        field: field.as_str().to_string(),
        reason: reason.into(),
    }
}

impl PatchTarget for CheckIn {
    const SIDE: ShiftSide = ShiftSide::CheckIn;
    const PATCHABLE: &'static [FieldName] =
        &[FieldName::Target, FieldName::FuelFull, FieldName::IssueNote];

    fn read_field(&self, field: FieldName) -> Option<FieldValue> {
        match field {
            FieldName::Target => Some(FieldValue::Amount(self.target)),
            FieldName::FuelFull => Some(FieldValue::Flag(self.fuel_full)),
            FieldName::IssueNote => Some(FieldValue::Text(self.issue_note.value().to_string())),
            FieldName::Realized => None,
        }
    }

    fn write_field(&mut self, field: FieldName, value: &FieldValue) -> Result<(), DomainError> {
        match (field, value) {
            (FieldName::Target, FieldValue::Amount(target)) => {
                validate_target(*target).map_err(|e| rejected(field, e.to_string()))?;
                self.target = *target;
            }
            (FieldName::FuelFull, FieldValue::Flag(flag)) => self.fuel_full = *flag,
            (FieldName::IssueNote, FieldValue::Text(note)) => {
                validate_issue_note(note).map_err(|e| rejected(field, e.to_string()))?;
                self.issue_note = IssueNote::new(note);
            }
            (FieldName::Realized, _) => return Err(rejected(field, "not a check-in field")),
            _ => {
                return Err(rejected(
                    field,
                    format!("expected a {} value", FieldValue::type_name(field)),
                ));
            }
        }
        Ok(())
    }
}

impl PatchTarget for CheckOut {
    const SIDE: ShiftSide = ShiftSide::CheckOut;
    const PATCHABLE: &'static [FieldName] =
        &[FieldName::Realized, FieldName::FuelFull, FieldName::IssueNote];

    fn read_field(&self, field: FieldName) -> Option<FieldValue> {
        match field {
            FieldName::Realized => Some(FieldValue::Amount(self.realized)),
            FieldName::FuelFull => Some(FieldValue::Flag(self.fuel_full)),
            FieldName::IssueNote => Some(FieldValue::Text(self.issue_note.value().to_string())),
            FieldName::Target => None,
        }
    }

    fn write_field(&mut self, field: FieldName, value: &FieldValue) -> Result<(), DomainError> {
        match (field, value) {
            (FieldName::Realized, FieldValue::Amount(realized)) => {
                validate_realized(*realized).map_err(|e| rejected(field, e.to_string()))?;
                self.realized = *realized;
            }
            (FieldName::FuelFull, FieldValue::Flag(flag)) => self.fuel_full = *flag,
            (FieldName::IssueNote, FieldValue::Text(note)) => {
                validate_issue_note(note).map_err(|e| rejected(field, e.to_string()))?;
                self.issue_note = IssueNote::new(note);
            }
            (FieldName::Target, _) => return Err(rejected(field, "not a check-out field")),
            _ => {
                return Err(rejected(
                    field,
                    format!("expected a {} value", FieldValue::type_name(field)),
                ));
            }
        }
        Ok(())
    }
}

/// Raw field map as stored with a request and accepted from callers.
pub type RawFields = BTreeMap<String, FieldValue>;

/// A validated, allow-listed set of field updates for one shift side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPatch {
    side: ShiftSide,
    fields: BTreeMap<FieldName, FieldValue>,
}

impl FieldPatch {
    /// Parses a raw proposal against the allow-list of `side`.
    ///
    /// Values are range-checked with the same rules as the ledger itself.
    ///
    /// # Errors
    ///
    /// * `EmptyPatch` if no fields are proposed
    /// * `UnknownField` for keys outside the side's allow-list
    /// * `FieldTypeMismatch` for values of the wrong type
    /// * the ledger's own validation errors for out-of-range values
    pub fn parse(side: ShiftSide, raw: &RawFields) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::EmptyPatch);
        }

        let mut fields: BTreeMap<FieldName, FieldValue> = BTreeMap::new();
        for (key, value) in raw {
            let field: FieldName = FieldName::for_side(side, key)?;
            if !value.type_matches(field) {
                return Err(DomainError::FieldTypeMismatch {
                    field: key.clone(),
                    expected: FieldValue::type_name(field),
                });
            }
            match (field, value) {
                (FieldName::Target, FieldValue::Amount(v)) => validate_target(*v)?,
                (FieldName::Realized, FieldValue::Amount(v)) => validate_realized(*v)?,
                (FieldName::IssueNote, FieldValue::Text(v)) => validate_issue_note(v)?,
                _ => {}
            }
            fields.insert(field, value.clone());
        }

        Ok(Self { side, fields })
    }

    #[must_use]
    pub const fn side(&self) -> ShiftSide {
        self.side
    }

    /// Reads the current values of exactly the patched fields from `record`.
    #[must_use]
    pub fn capture_original<T: PatchTarget>(&self, record: &T) -> RawFields {
        self.fields
            .keys()
            .filter_map(|field| {
                record
                    .read_field(*field)
                    .map(|value| (field.as_str().to_string(), value))
            })
            .collect()
    }

    /// Applies every field to `record`.
    ///
    /// On error `record` may be partially written; callers apply to a copy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PatchRejected` if the patch targets the other
    /// side or a value is refused by the record.
    pub fn apply_to<T: PatchTarget>(&self, record: &mut T) -> Result<(), DomainError> {
        if T::SIDE != self.side {
            return Err(DomainError::PatchRejected {
                field: String::from("*"),
                reason: format!("patch targets a {} but record is a {}", self.side, T::SIDE),
            });
        }
        for (field, value) in &self.fields {
            record.write_field(*field, value)?;
        }
        Ok(())
    }

    /// Returns the proposed issue note, if the patch sets one.
    #[must_use]
    pub fn issue_note(&self) -> Option<IssueNote> {
        match self.fields.get(&FieldName::IssueNote) {
            Some(FieldValue::Text(note)) => Some(IssueNote::new(note)),
            _ => None,
        }
    }

    /// Converts back to the stored representation.
    #[must_use]
    pub fn to_raw(&self) -> RawFields {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str().to_string(), value.clone()))
            .collect()
    }
}

/// A driver's proposal to correct one side of a recorded shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModificationRequest {
    /// The canonical identifier, if persisted.
    pub request_id: Option<i64>,
    pub driver_id: i64,
    pub side: ShiftSide,
    pub shift_date: Date,
    /// Values of the proposed fields at submission time.
    pub original: RawFields,
    pub proposed: RawFields,
    pub justification: String,
    pub status: ModificationStatus,
    /// The deciding account. Cleared if that account is removed.
    pub reviewer_account_id: Option<i64>,
    pub admin_comment: String,
    pub created_at: OffsetDateTime,
    pub decided_at: Option<OffsetDateTime>,
}

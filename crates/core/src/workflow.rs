// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The modification request state machine.
//!
//! A request moves from `PENDING` to exactly one of `APPROVED` or
//! `REJECTED`. Approval patches a copy of the live record; the caller
//! persists the patched record and the decided request together, so a
//! failed patch leaves the stored request pending and decidable again.

use crate::error::CoreError;
use crate::event::{LedgerEvent, issue_event};
use crate::state::{DecisionResult, ShiftDay, SubmissionResult};
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use taxi_ledger_domain::{
    BreakdownOrigin, CheckIn, CheckOut, DomainError, FieldPatch, IssueNote, ModificationRequest,
    ModificationStatus, RawFields, Severity, ShiftSide, validate_justification,
};
use time::OffsetDateTime;

/// Creates a pending modification request against one side of a shift.
///
/// The original snapshot holds the current values of exactly the proposed
/// fields.
///
/// # Arguments
///
/// * `day` - The driver's records for the targeted date
/// * `side` - Which record the request patches
/// * `justification` - Why the driver asks for the change
/// * `proposed` - Field name to new value
/// * `now` - Submission timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The targeted record does not exist (`NoSuchShiftSide`)
/// - The justification is blank
/// - The proposal is empty, names a field outside the side's allow-list,
///   or carries a value of the wrong type or range
pub fn submit_modification(
    day: &ShiftDay,
    side: ShiftSide,
    justification: &str,
    proposed: &RawFields,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<SubmissionResult, CoreError> {
    let no_such_side = || DomainError::NoSuchShiftSide {
        driver_id: day.driver_id,
        side,
        date: day.shift_date,
    };

    let original: RawFields = match side {
        ShiftSide::CheckIn => {
            let record: &CheckIn = day.check_in.as_ref().ok_or_else(no_such_side)?;
            validate_justification(justification)?;
            FieldPatch::parse(side, proposed)?.capture_original(record)
        }
        ShiftSide::CheckOut => {
            let record: &CheckOut = day.check_out.as_ref().ok_or_else(no_such_side)?;
            validate_justification(justification)?;
            FieldPatch::parse(side, proposed)?.capture_original(record)
        }
    };

    let request: ModificationRequest = ModificationRequest {
        request_id: None,
        driver_id: day.driver_id,
        side,
        shift_date: day.shift_date,
        original,
        proposed: proposed.clone(),
        justification: justification.trim().to_string(),
        status: ModificationStatus::Pending,
        reviewer_account_id: None,
        admin_comment: String::new(),
        created_at: now,
        decided_at: None,
    };

    let action: Action = Action::new(
        String::from("SubmitModification"),
        Some(format!(
            "Requested change to {side} of {}: {}",
            day.shift_date,
            field_list(proposed)
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        action,
        day.snapshot(),
        request_snapshot(&request),
        day.driver_id,
    );

    Ok(SubmissionResult {
        request,
        audit_event,
    })
}

/// Approves or rejects a pending modification request.
///
/// On approval the stored proposal is re-validated and applied to a copy of
/// the live record. On rejection the ledger is untouched.
///
/// # Arguments
///
/// * `request` - The request to decide
/// * `day` - The driver's current records for the request's date
/// * `approve` - Approve when true, reject otherwise
/// * `comment` - The reviewer's comment
/// * `reviewer_account_id` - The deciding account
/// * `now` - Decision timestamp
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The request was already decided (`AlreadyDecided`)
/// - The targeted record no longer exists (`NoSuchShiftSide`)
/// - The stored proposal cannot be applied (`PatchRejected`)
#[allow(clippy::too_many_arguments)]
pub fn decide_modification(
    request: &ModificationRequest,
    day: &ShiftDay,
    approve: bool,
    comment: &str,
    reviewer_account_id: i64,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<DecisionResult, CoreError> {
    if request.status.is_terminal() {
        return Err(CoreError::DomainViolation(DomainError::AlreadyDecided {
            request_id: request.request_id,
            status: request.status.as_str().to_string(),
        }));
    }

    let new_status: ModificationStatus = if approve {
        ModificationStatus::Approved
    } else {
        ModificationStatus::Rejected
    };
    request.status.validate_transition(new_status)?;

    let (new_day, events): (Option<ShiftDay>, Vec<LedgerEvent>) = if approve {
        let (patched, event): (ShiftDay, Option<LedgerEvent>) = apply_patch(request, day)?;
        (Some(patched), event.into_iter().collect())
    } else {
        (None, Vec::new())
    };

    let before: StateSnapshot = request_snapshot(request);
    let mut decided: ModificationRequest = request.clone();
    decided.status = new_status;
    decided.reviewer_account_id = Some(reviewer_account_id);
    decided.admin_comment = comment.trim().to_string();
    decided.decided_at = Some(now);

    let action_name: &str = if approve {
        "ApproveModification"
    } else {
        "RejectModification"
    };
    let action: Action = Action::new(
        action_name.to_string(),
        Some(format!(
            "{} change to {} of {}: {}",
            new_status.as_str(),
            request.side,
            request.shift_date,
            field_list(&request.proposed)
        )),
    );
    let after: StateSnapshot = new_day.as_ref().map_or_else(
        || request_snapshot(&decided),
        |patched| {
            StateSnapshot::new(format!(
                "{},{}",
                request_snapshot(&decided).data,
                patched.snapshot().data
            ))
        },
    );
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, request.driver_id);

    Ok(DecisionResult {
        request: decided,
        new_day,
        audit_event,
        events,
    })
}

/// Applies the stored proposal to a copy of the targeted record.
fn apply_patch(
    request: &ModificationRequest,
    day: &ShiftDay,
) -> Result<(ShiftDay, Option<LedgerEvent>), DomainError> {
    let patch: FieldPatch =
        FieldPatch::parse(request.side, &request.proposed).map_err(patch_failure)?;
    let no_such_side = || DomainError::NoSuchShiftSide {
        driver_id: request.driver_id,
        side: request.side,
        date: request.shift_date,
    };

    let mut new_day: ShiftDay = day.clone();
    match request.side {
        ShiftSide::CheckIn => {
            let mut record: CheckIn = day.check_in.clone().ok_or_else(no_such_side)?;
            patch.apply_to(&mut record)?;
            new_day.check_in = Some(record);
        }
        ShiftSide::CheckOut => {
            let mut record: CheckOut = day.check_out.clone().ok_or_else(no_such_side)?;
            patch.apply_to(&mut record)?;
            new_day.check_out = Some(record);
        }
    }

    let event: Option<LedgerEvent> = patch.issue_note().and_then(|note: IssueNote| {
        issue_event(
            request.driver_id,
            request.shift_date,
            &note,
            Severity::Moderate,
            BreakdownOrigin::Modification,
        )
    });

    Ok((new_day, event))
}

/// Re-labels a validation failure of a stored proposal as a patch failure.
fn patch_failure(err: DomainError) -> DomainError {
    match err {
        DomainError::PatchRejected { .. } => err,
        DomainError::UnknownField { field, .. } | DomainError::FieldTypeMismatch { field, .. } => {
            let reason: String = format!("stored proposal is invalid for field '{field}'");
            DomainError::PatchRejected { field, reason }
        }
        other => DomainError::PatchRejected {
            field: String::from("*"),
            reason: other.to_string(),
        },
    }
}

fn request_snapshot(request: &ModificationRequest) -> StateSnapshot {
    StateSnapshot::new(format!(
        "request={},side={},date={},status={}",
        request
            .request_id
            .map_or_else(|| String::from("new"), |id| id.to_string()),
        request.side.as_str(),
        request.shift_date,
        request.status.as_str()
    ))
}

fn field_list(fields: &RawFields) -> String {
    fields.keys().cloned().collect::<Vec<String>>().join(", ")
}

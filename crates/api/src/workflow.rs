// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Modification request workflow.
//!
//! A decision, the ledger patch it implies and the request's status change
//! commit together. If the patch cannot be applied the whole transaction
//! rolls back and the request stays `PENDING`, so the decision can be
//! retried once the cause is fixed.

use taxi_ledger::{DecisionResult, LedgerEvent, ShiftDay, SubmissionResult};
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{
    DomainError, ModificationRequest, ModificationStatus, Principal, Scope, ShiftSide,
};
use taxi_ledger_persistence::{Persistence, RequestFilter};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::auth::{AuthorizationService, to_audit_actor};
use crate::breakdowns::{IssueSink, dispatch_events};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::registry::ensure_active_driver;
use crate::request_response::{Outcome, SubmitModificationRequest};
use crate::scope::{RecordQuery, ScopedRecords, scoped_query, visible_drivers};

/// Submits a correction to one side of the calling driver's shift.
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not linked to a driver, or the driver is inactive
/// - The targeted record does not exist (`NoSuchShiftSide`)
/// - The justification is blank
/// - The proposal is empty, names an unknown field or carries a bad value
pub fn submit(
    persistence: &mut Persistence,
    principal: &Principal,
    request: &SubmitModificationRequest,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<ModificationRequest, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "submit_modification")?;
    ensure_active_driver(persistence, driver_id)?;

    let day: ShiftDay = persistence.load_shift_day(driver_id, request.shift_date)?;
    let submission: SubmissionResult = taxi_ledger::submit_modification(
        &day,
        request.side,
        &request.justification,
        &request.proposed,
        now,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;

    let request_id: i64 = persistence.transaction(|tx| -> Result<i64, ApiError> {
        let request_id: i64 = tx.insert_modification_request(&submission.request)?;
        tx.persist_audit_event(&submission.audit_event)?;
        Ok(request_id)
    })?;

    info!(
        request_id,
        driver_id,
        side = request.side.as_str(),
        "Submitted modification request"
    );

    let mut stored: ModificationRequest = submission.request;
    stored.request_id = Some(request_id);
    Ok(stored)
}

/// Approves or rejects a pending request.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `sink` - Receives the issue event when an approved patch adds a note
/// * `principal` - The reviewer
/// * `request_id` - The request to decide
/// * `approve` - Approve when true, reject otherwise
/// * `comment` - The reviewer's comment
/// * `now` - Decision timestamp
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The reviewer cannot see the request's driver
/// - The reviewer is the request's driver
/// - The request does not exist
/// - The request was already decided (`AlreadyDecided`)
/// - The stored proposal can no longer be applied (`Dependency`); the
///   request is left pending
#[allow(clippy::too_many_arguments)]
pub fn decide(
    persistence: &mut Persistence,
    sink: &mut dyn IssueSink,
    principal: &Principal,
    request_id: i64,
    approve: bool,
    comment: &str,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<Outcome<ModificationRequest>, ApiError> {
    // Resolve scope before touching the request
    let scope: Scope = visible_drivers(persistence, principal)?;
    if scope.is_empty() {
        return Err(ApiError::Unauthorized {
            message: String::from("Not authorized to decide modification requests"),
        });
    }

    let request: ModificationRequest =
        persistence.get_modification_request(request_id)?.ok_or_else(|| {
            ApiError::not_found(
                "ModificationRequest",
                format!("Request {request_id} does not exist"),
            )
        })?;
    AuthorizationService::authorize_visible(&scope, request.driver_id, "decide_modification")?;
    if principal.linked_driver_id() == Some(request.driver_id) {
        return Err(ApiError::Unauthorized {
            message: format!("Request {request_id} was submitted by the reviewer's own driver"),
        });
    }

    let actor: Actor = to_audit_actor(principal);

    let (decided, events): (ModificationRequest, Vec<LedgerEvent>) = persistence.transaction(
        |tx| -> Result<(ModificationRequest, Vec<LedgerEvent>), ApiError> {
            let day: ShiftDay = tx.load_shift_day(request.driver_id, request.shift_date)?;
            let result: DecisionResult = taxi_ledger::decide_modification(
                &request,
                &day,
                approve,
                comment,
                principal.account_id(),
                now,
                actor.clone(),
                cause.clone(),
            )
            .map_err(translate_core_error)?;

            if let Some(patched) = &result.new_day {
                write_patched_side(tx, request.side, patched)?;
            }

            let changed: usize = tx.record_modification_decision(request_id, &result.request)?;
            if changed == 0 {
                debug!(request_id, "Request was decided concurrently");
                return Err(translate_domain_error(DomainError::AlreadyDecided {
                    request_id: Some(request_id),
                    status: String::from("decided"),
                }));
            }
            tx.persist_audit_event(&result.audit_event)?;

            Ok((result.request, result.events))
        },
    )?;

    info!(
        request_id,
        driver_id = decided.driver_id,
        status = decided.status.as_str(),
        "Decided modification request"
    );

    let warnings: Vec<String> = dispatch_events(persistence, sink, &events, &actor, &cause, now);
    Ok(Outcome {
        value: decided,
        warnings,
    })
}

fn write_patched_side(
    tx: &mut Persistence,
    side: ShiftSide,
    patched: &ShiftDay,
) -> Result<(), ApiError> {
    let missing = || ApiError::Internal {
        message: format!("Approved patch left no {side} record"),
    };
    match side {
        ShiftSide::CheckIn => {
            tx.update_check_in(patched.check_in.as_ref().ok_or_else(missing)?)?;
        }
        ShiftSide::CheckOut => {
            tx.update_check_out(patched.check_out.as_ref().ok_or_else(missing)?)?;
        }
    }
    Ok(())
}

/// Lists the calling driver's own requests, oldest first.
///
/// # Errors
///
/// Returns an error if the principal is not linked to a driver or the
/// lookup fails.
pub fn list_my_requests(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<ModificationRequest>, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "list_my_requests")?;
    let filter: RequestFilter = RequestFilter {
        driver_ids: Some(vec![driver_id]),
        status: None,
    };
    Ok(persistence.list_modification_requests(&filter)?)
}

/// Lists pending requests for drivers the caller can see, oldest first.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_pending_requests(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<ModificationRequest>, ApiError> {
    let filter: RequestFilter = RequestFilter {
        driver_ids: None,
        status: Some(ModificationStatus::Pending),
    };
    match scoped_query(persistence, principal, RecordQuery::Requests(filter))? {
        ScopedRecords::Requests(requests) => Ok(requests),
        _ => Err(ApiError::Internal {
            message: String::from("Request query returned another record kind"),
        }),
    }
}

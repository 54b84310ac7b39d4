// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Supervisor assignment management.
//!
//! Single assignments are transactional. Roster edits are best-effort
//! batches: each driver is processed in its own transaction and failures
//! are reported per item, never rolling back drivers already processed.

use std::collections::BTreeSet;
use taxi_ledger::{AssignmentTransition, EdgeChange};
use taxi_ledger_audit::Cause;
use taxi_ledger_domain::{AssignmentEdge, DomainError, Principal, Role};
use taxi_ledger_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::auth::{AuthorizationService, to_audit_actor};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::registry::load_principal;
use crate::request_response::{BatchFailure, BatchResult};

fn store_transition(
    persistence: &mut Persistence,
    transition: AssignmentTransition,
) -> Result<AssignmentEdge, ApiError> {
    let AssignmentTransition {
        mut edge,
        change,
        audit_event,
    } = transition;
    let Some(audit_event) = audit_event else {
        return Ok(edge);
    };

    persistence.transaction(|tx| -> Result<(), ApiError> {
        match change {
            EdgeChange::Created => {
                edge.edge_id = Some(tx.insert_assignment_edge(&edge)?);
            }
            EdgeChange::Revived | EdgeChange::Deactivated => tx.update_assignment_edge(&edge)?,
            EdgeChange::Unchanged => {}
        }
        tx.persist_audit_event(&audit_event)?;
        Ok(())
    })?;

    info!(
        driver_id = edge.driver_id,
        supervisor_account_id = edge.supervisor_account_id,
        active = edge.active,
        "Assignment changed"
    );
    Ok(edge)
}

fn load_supervisor(
    persistence: &mut Persistence,
    supervisor_account_id: i64,
) -> Result<Principal, ApiError> {
    let supervisor: Principal = load_principal(persistence, supervisor_account_id)?;
    if supervisor.role() != Role::Supervisor {
        return Err(translate_domain_error(DomainError::NotASupervisor {
            account_id: supervisor_account_id,
        }));
    }
    Ok(supervisor)
}

fn assign_loaded(
    persistence: &mut Persistence,
    principal: &Principal,
    supervisor: &Principal,
    driver_id: i64,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<AssignmentEdge, ApiError> {
    if persistence.get_driver(driver_id)?.is_none() {
        return Err(ApiError::not_found(
            "Driver",
            format!("Driver {driver_id} does not exist"),
        ));
    }
    let existing: Option<AssignmentEdge> =
        persistence.get_assignment_edge(driver_id, supervisor.account_id())?;

    let transition: AssignmentTransition = taxi_ledger::apply_assignment(
        principal.account_id(),
        supervisor,
        driver_id,
        existing.as_ref(),
        now,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;

    store_transition(persistence, transition)
}

fn unassign_loaded(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    supervisor_account_id: i64,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<AssignmentEdge, ApiError> {
    let existing: AssignmentEdge = persistence
        .get_assignment_edge(driver_id, supervisor_account_id)?
        .ok_or_else(|| {
            ApiError::not_found(
                "AssignmentEdge",
                format!("Driver {driver_id} is not assigned to account {supervisor_account_id}"),
            )
        })?;

    let transition: AssignmentTransition =
        taxi_ledger::apply_unassignment(&existing, now, to_audit_actor(principal), cause);
    store_transition(persistence, transition)
}

/// Gives a supervisor visibility over a driver.
///
/// Assigning an already active pair changes nothing. Assigning a pair whose
/// edge was deactivated revives it and records the new administrator.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `principal` - The calling administrator
/// * `driver_id` - The driver to assign
/// * `supervisor_account_id` - The supervising account
/// * `now` - Current instant
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The driver or account does not exist
/// - The account is not a supervisor
pub fn assign(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    supervisor_account_id: i64,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<AssignmentEdge, ApiError> {
    AuthorizationService::authorize_administration(principal, "assign")?;
    let supervisor: Principal = load_supervisor(persistence, supervisor_account_id)?;
    assign_loaded(persistence, principal, &supervisor, driver_id, now, cause)
}

/// Removes a supervisor's visibility over a driver, keeping the edge.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator or the pair was
/// never assigned.
pub fn unassign(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    supervisor_account_id: i64,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<AssignmentEdge, ApiError> {
    AuthorizationService::authorize_administration(principal, "unassign")?;
    unassign_loaded(persistence, principal, driver_id, supervisor_account_id, now, cause)
}

/// Deactivates every active edge of a supervisor.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator or the edges
/// cannot be listed. Per-driver failures are reported in the result.
pub fn unassign_all(
    persistence: &mut Persistence,
    principal: &Principal,
    supervisor_account_id: i64,
    now: OffsetDateTime,
    cause: &Cause,
) -> Result<BatchResult, ApiError> {
    AuthorizationService::authorize_administration(principal, "unassign_all")?;

    let mut result: BatchResult = BatchResult::default();
    for edge in persistence.list_assignment_edges(supervisor_account_id, true)? {
        let outcome: Result<AssignmentEdge, ApiError> = unassign_loaded(
            persistence,
            principal,
            edge.driver_id,
            supervisor_account_id,
            now,
            cause.clone(),
        );
        record(&mut result, edge.driver_id, outcome);
    }
    Ok(result)
}

/// Replaces a supervisor's roster with exactly `driver_ids`.
///
/// Drivers no longer listed are unassigned first, then every listed driver
/// is assigned. `succeeded` lists the drivers processed without error in
/// either step.
///
/// # Errors
///
/// Returns an error only if the whole batch cannot start: the caller is not
/// an administrator, or the account is unknown or not a supervisor.
pub fn replace_assignments(
    persistence: &mut Persistence,
    principal: &Principal,
    supervisor_account_id: i64,
    driver_ids: &BTreeSet<i64>,
    now: OffsetDateTime,
    cause: &Cause,
) -> Result<BatchResult, ApiError> {
    AuthorizationService::authorize_administration(principal, "replace_assignments")?;
    let supervisor: Principal = load_supervisor(persistence, supervisor_account_id)?;

    let mut result: BatchResult = BatchResult::default();

    let current: BTreeSet<i64> = persistence.assigned_driver_ids(supervisor_account_id)?;
    for driver_id in current.difference(driver_ids) {
        let outcome: Result<AssignmentEdge, ApiError> = unassign_loaded(
            persistence,
            principal,
            *driver_id,
            supervisor_account_id,
            now,
            cause.clone(),
        );
        record(&mut result, *driver_id, outcome);
    }

    for driver_id in driver_ids {
        let outcome: Result<AssignmentEdge, ApiError> = assign_loaded(
            persistence,
            principal,
            &supervisor,
            *driver_id,
            now,
            cause.clone(),
        );
        record(&mut result, *driver_id, outcome);
    }

    info!(
        supervisor_account_id,
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        "Replaced supervisor roster"
    );
    Ok(result)
}

fn record(result: &mut BatchResult, driver_id: i64, outcome: Result<AssignmentEdge, ApiError>) {
    match outcome {
        Ok(_) => result.succeeded.push(driver_id),
        Err(err) => {
            warn!(driver_id, error = %err, "Assignment batch item failed");
            result.failed.push(BatchFailure {
                driver_id,
                reason: err.to_string(),
            });
        }
    }
}

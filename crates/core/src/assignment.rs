// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::{AssignmentTransition, EdgeChange};
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use taxi_ledger_domain::{AssignmentEdge, DomainError, Principal, Role};
use time::OffsetDateTime;

/// Grants a supervisor visibility over a driver.
///
/// Assignment is idempotent. An active edge is left as is and produces no
/// audit event; an inactive edge is revived and re-attributed to the
/// assigning administrator.
///
/// # Arguments
///
/// * `admin_account_id` - The administrator making the assignment
/// * `supervisor` - The supervisor principal
/// * `driver_id` - The driver to assign
/// * `existing` - The stored edge for this pair, if any
/// * `now` - Timestamp of the change
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns `NotASupervisor` if the principal does not resolve to the
/// supervisor role.
pub fn apply_assignment(
    admin_account_id: i64,
    supervisor: &Principal,
    driver_id: i64,
    existing: Option<&AssignmentEdge>,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<AssignmentTransition, CoreError> {
    if supervisor.role() != Role::Supervisor {
        return Err(CoreError::DomainViolation(DomainError::NotASupervisor {
            account_id: supervisor.account_id(),
        }));
    }

    let (edge, change): (AssignmentEdge, EdgeChange) = match existing {
        Some(edge) if edge.active => {
            return Ok(AssignmentTransition {
                edge: edge.clone(),
                change: EdgeChange::Unchanged,
                audit_event: None,
            });
        }
        Some(edge) => {
            let mut revived: AssignmentEdge = edge.clone();
            revived.active = true;
            revived.created_by = Some(admin_account_id);
            revived.updated_at = now;
            (revived, EdgeChange::Revived)
        }
        None => (
            AssignmentEdge {
                edge_id: None,
                driver_id,
                supervisor_account_id: supervisor.account_id(),
                active: true,
                created_by: Some(admin_account_id),
                created_at: now,
                updated_at: now,
            },
            EdgeChange::Created,
        ),
    };

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("AssignDriver"),
            Some(format!(
                "Assigned driver {driver_id} to supervisor {}",
                supervisor.account_id()
            )),
        ),
        edge_snapshot(existing),
        edge_snapshot(Some(&edge)),
        driver_id,
    );

    Ok(AssignmentTransition {
        edge,
        change,
        audit_event: Some(audit_event),
    })
}

/// Revokes a supervisor's visibility over a driver.
///
/// The edge is kept and marked inactive. Unassigning an inactive edge is a
/// no-op.
///
/// # Arguments
///
/// * `existing` - The stored edge
/// * `now` - Timestamp of the change
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
#[must_use]
pub fn apply_unassignment(
    existing: &AssignmentEdge,
    now: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> AssignmentTransition {
    if !existing.active {
        return AssignmentTransition {
            edge: existing.clone(),
            change: EdgeChange::Unchanged,
            audit_event: None,
        };
    }

    let mut edge: AssignmentEdge = existing.clone();
    edge.active = false;
    edge.updated_at = now;

    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("UnassignDriver"),
            Some(format!(
                "Unassigned driver {} from supervisor {}",
                edge.driver_id, edge.supervisor_account_id
            )),
        ),
        edge_snapshot(Some(existing)),
        edge_snapshot(Some(&edge)),
        edge.driver_id,
    );

    AssignmentTransition {
        edge,
        change: EdgeChange::Deactivated,
        audit_event: Some(audit_event),
    }
}

fn edge_snapshot(edge: Option<&AssignmentEdge>) -> StateSnapshot {
    StateSnapshot::new(edge.map_or_else(
        || String::from("edge=none"),
        |e| {
            format!(
                "driver={},supervisor={},active={}",
                e.driver_id, e.supervisor_account_id, e.active
            )
        },
    ))
}

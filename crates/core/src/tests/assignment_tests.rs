// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    TEST_DRIVER, create_test_actor, create_test_cause, create_test_now, create_test_supervisor,
};
use crate::{AssignmentTransition, CoreError, EdgeChange, apply_assignment, apply_unassignment};
use std::collections::BTreeSet;
use taxi_ledger_domain::{AssignmentEdge, DomainError, Principal};
use time::macros::datetime;

const ADMIN: i64 = 1;
const SUPERVISOR: i64 = 20;

fn assign(existing: Option<&AssignmentEdge>) -> AssignmentTransition {
    apply_assignment(
        ADMIN,
        &create_test_supervisor(SUPERVISOR),
        TEST_DRIVER,
        existing,
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_first_assignment_creates_edge() {
    let transition: AssignmentTransition = assign(None);

    assert_eq!(transition.change, EdgeChange::Created);
    assert!(transition.edge.active);
    assert_eq!(transition.edge.driver_id, TEST_DRIVER);
    assert_eq!(transition.edge.supervisor_account_id, SUPERVISOR);
    assert_eq!(transition.edge.created_by, Some(ADMIN));
    let event = transition.audit_event.unwrap();
    assert_eq!(event.action.name, "AssignDriver");
    assert_eq!(event.driver_id, Some(TEST_DRIVER));
}

#[test]
fn test_assigning_active_edge_is_noop() {
    let mut edge: AssignmentEdge = assign(None).edge;
    edge.edge_id = Some(3);

    let transition: AssignmentTransition = assign(Some(&edge));

    assert_eq!(transition.change, EdgeChange::Unchanged);
    assert_eq!(transition.edge, edge);
    assert!(transition.audit_event.is_none());
}

#[test]
fn test_assigning_inactive_edge_revives_it() {
    let mut edge: AssignmentEdge = assign(None).edge;
    edge.edge_id = Some(3);
    edge.active = false;
    edge.created_by = Some(99);

    let transition: AssignmentTransition = assign(Some(&edge));

    assert_eq!(transition.change, EdgeChange::Revived);
    assert!(transition.edge.active);
    assert_eq!(transition.edge.edge_id, Some(3));
    assert_eq!(transition.edge.created_by, Some(ADMIN));
    assert!(transition.audit_event.is_some());
}

#[test]
fn test_assignment_requires_supervisor_role() {
    let driver_account: Principal =
        Principal::new(30, false, false, BTreeSet::new(), Some(4), false);

    let err: CoreError = apply_assignment(
        ADMIN,
        &driver_account,
        TEST_DRIVER,
        None,
        create_test_now(),
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::NotASupervisor { account_id: 30 })
    );
}

#[test]
fn test_unassignment_deactivates_edge() {
    let edge: AssignmentEdge = assign(None).edge;
    let later = datetime!(2024-06-03 10:00 UTC);

    let transition: AssignmentTransition =
        apply_unassignment(&edge, later, create_test_actor(), create_test_cause());

    assert_eq!(transition.change, EdgeChange::Deactivated);
    assert!(!transition.edge.active);
    assert_eq!(transition.edge.updated_at, later);
    assert_eq!(transition.edge.created_at, edge.created_at);
    assert_eq!(transition.audit_event.unwrap().action.name, "UnassignDriver");
}

#[test]
fn test_unassigning_inactive_edge_is_noop() {
    let mut edge: AssignmentEdge = assign(None).edge;
    edge.active = false;

    let transition: AssignmentTransition =
        apply_unassignment(&edge, create_test_now(), create_test_actor(), create_test_cause());

    assert_eq!(transition.change, EdgeChange::Unchanged);
    assert!(transition.audit_event.is_none());
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_admin, create_test_cause, create_test_date, create_test_driver, create_test_now,
    create_test_persistence, create_test_supervisor, driver_id_of, open_test_shift,
};
use crate::{
    ApiError, SubmitModificationRequest, assign, create_account, decide, load_principal,
    register_driver, remove_account, remove_driver, set_driver_active, submit,
};
use taxi_ledger_audit::AuditEvent;
use taxi_ledger_domain::{
    AssignmentEdge, Driver, FieldValue, ModificationRequest, Principal, RawFields, Role,
    ShiftSide,
};
use taxi_ledger_persistence::{NewAccount, Persistence, ShiftFilter};

#[test]
fn test_register_driver_normalizes_and_audits() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);

    let driver: Driver = register_driver(
        &mut persistence,
        &admin,
        "  Jeanne ",
        "Moreau",
        "+33612345678",
        "Jeanne.Moreau@Example.com",
        create_test_cause(),
    )
    .unwrap();

    let driver_id: i64 = driver.driver_id.unwrap();
    assert!(driver.active);
    assert_eq!(driver.first_name, "Jeanne");
    assert_eq!(driver.email, "jeanne.moreau@example.com");

    let events: Vec<AuditEvent> = persistence.list_audit_events(Some(driver_id)).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action.name, "RegisterDriver");
}

#[test]
fn test_register_driver_rejects_bad_phone() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);

    let result: Result<Driver, ApiError> = register_driver(
        &mut persistence,
        &admin,
        "Jeanne",
        "Moreau",
        "12-34",
        "jeanne@example.com",
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_driver_cannot_register_drivers() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    let driver: Principal = create_test_driver(&mut persistence, &admin, "Martin");

    let result: Result<Driver, ApiError> = register_driver(
        &mut persistence,
        &driver,
        "Jeanne",
        "Moreau",
        "+33612345678",
        "jeanne@example.com",
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_deactivated_driver_is_kept() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    let driver: Principal = create_test_driver(&mut persistence, &admin, "Martin");
    open_test_shift(&mut persistence, &driver, 50_000);

    let updated: Driver = set_driver_active(
        &mut persistence,
        &admin,
        driver_id_of(&driver),
        false,
        create_test_cause(),
    )
    .unwrap();

    assert!(!updated.active);
    let stored: Driver = persistence
        .get_driver(driver_id_of(&driver))
        .unwrap()
        .unwrap();
    assert!(!stored.active);
    assert_eq!(
        persistence
            .list_check_ins(&ShiftFilter::default())
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_remove_driver_cascades_records_but_keeps_audit() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    let driver: Principal = create_test_driver(&mut persistence, &admin, "Martin");
    let driver_id: i64 = driver_id_of(&driver);
    open_test_shift(&mut persistence, &driver, 50_000);

    remove_driver(&mut persistence, &admin, driver_id, create_test_cause()).unwrap();

    assert!(persistence.get_driver(driver_id).unwrap().is_none());
    assert!(persistence
        .list_check_ins(&ShiftFilter::default())
        .unwrap()
        .is_empty());
    let events: Vec<AuditEvent> = persistence.list_audit_events(Some(driver_id)).unwrap();
    assert_eq!(events.last().unwrap().action.name, "RemoveDriver");
}

#[test]
fn test_remove_unknown_driver_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);

    let result: Result<(), ApiError> =
        remove_driver(&mut persistence, &admin, 77, create_test_cause());

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_duplicate_login_conflicts() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    create_test_supervisor(&mut persistence, &admin, "sup");

    let result: Result<i64, ApiError> = create_account(
        &mut persistence,
        &admin,
        NewAccount {
            login_name: String::from("sup"),
            display_name: String::from("Another"),
            ..NewAccount::default()
        },
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_loaded_principal_resolves_role() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    let supervisor: Principal = create_test_supervisor(&mut persistence, &admin, "sup");

    let reloaded: Principal = load_principal(&mut persistence, supervisor.account_id()).unwrap();

    assert_eq!(admin.role(), Role::SuperAdmin);
    assert_eq!(reloaded.role(), Role::Supervisor);
    assert!(matches!(
        load_principal(&mut persistence, 404),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_remove_account_clears_references() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin(&mut persistence);
    let staff: Principal = {
        let account: NewAccount = NewAccount {
            login_name: String::from("staff"),
            display_name: String::from("Staff"),
            is_staff_admin: true,
            ..NewAccount::default()
        };
        let account_id: i64 =
            create_account(&mut persistence, &admin, account, create_test_cause()).unwrap();
        load_principal(&mut persistence, account_id).unwrap()
    };
    let driver: Principal = create_test_driver(&mut persistence, &admin, "Martin");
    let supervisor: Principal = create_test_supervisor(&mut persistence, &admin, "sup");
    let driver_id: i64 = driver_id_of(&driver);

    assign(
        &mut persistence,
        &staff,
        driver_id,
        supervisor.account_id(),
        create_test_now(),
        create_test_cause(),
    )
    .unwrap();
    open_test_shift(&mut persistence, &driver, 50_000);
    let request: ModificationRequest = submit(
        &mut persistence,
        &driver,
        &SubmitModificationRequest {
            side: ShiftSide::CheckIn,
            shift_date: create_test_date(),
            justification: String::from("Wrong target"),
            proposed: RawFields::from([(String::from("fuel_full"), FieldValue::Flag(false))]),
        },
        create_test_now(),
        create_test_cause(),
    )
    .unwrap();
    let request_id: i64 = request.request_id.unwrap();
    decide(
        &mut persistence,
        &mut crate::BreakdownRegister,
        &staff,
        request_id,
        false,
        "No",
        create_test_now(),
        create_test_cause(),
    )
    .unwrap();

    remove_account(&mut persistence, &admin, staff.account_id(), create_test_cause()).unwrap();

    let edge: AssignmentEdge = persistence
        .get_assignment_edge(driver_id, supervisor.account_id())
        .unwrap()
        .unwrap();
    assert_eq!(edge.created_by, None);
    let decided: ModificationRequest = persistence
        .get_modification_request(request_id)
        .unwrap()
        .unwrap();
    assert_eq!(decided.reviewer_account_id, None);

    remove_account(&mut persistence, &admin, supervisor.account_id(), create_test_cause())
        .unwrap();
    assert!(persistence
        .get_assignment_edge(driver_id, supervisor.account_id())
        .unwrap()
        .is_none());
}

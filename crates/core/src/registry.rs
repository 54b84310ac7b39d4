// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::state::DriverTransition;
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use taxi_ledger_domain::{Driver, validate_account_fields, validate_driver_fields};

/// Validates and creates a new active driver.
///
/// The audit event is not yet scoped: the driver has no identifier until it
/// is stored, so the caller sets `audit_event.driver_id` after insertion.
///
/// # Errors
///
/// Returns an error if a name is blank or the phone or email is malformed.
pub fn register_driver(
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
    actor: Actor,
    cause: Cause,
) -> Result<DriverTransition, CoreError> {
    let (first_name, last_name, phone, email): (&str, &str, &str, &str) =
        (first_name.trim(), last_name.trim(), phone.trim(), email.trim());
    validate_driver_fields(first_name, last_name, phone, email)?;

    let driver: Driver = Driver::new(
        first_name.to_string(),
        last_name.to_string(),
        phone.to_string(),
        email.to_lowercase(),
    );

    let audit_event: AuditEvent = AuditEvent::new_global(
        actor,
        cause,
        Action::new(
            String::from("RegisterDriver"),
            Some(format!("Registered driver {}", driver.full_name())),
        ),
        StateSnapshot::new(String::from("driver=none")),
        driver_snapshot(&driver),
    );

    Ok(DriverTransition {
        driver,
        audit_event,
    })
}

/// Enables or disables a driver without deleting any history.
#[must_use]
pub fn set_driver_active(
    driver_id: i64,
    driver: &Driver,
    active: bool,
    actor: Actor,
    cause: Cause,
) -> DriverTransition {
    let mut updated: Driver = driver.clone();
    updated.active = active;

    let name: &str = if active {
        "ActivateDriver"
    } else {
        "DeactivateDriver"
    };
    let audit_event: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(name.to_string(), None),
        driver_snapshot(driver),
        driver_snapshot(&updated),
        driver_id,
    );

    DriverTransition {
        driver: updated,
        audit_event,
    }
}

/// Builds the audit event for a hard delete of a driver and its records.
#[must_use]
pub fn remove_driver(driver_id: i64, driver: &Driver, actor: Actor, cause: Cause) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        Action::new(
            String::from("RemoveDriver"),
            Some(format!(
                "Removed driver {} and all of their records",
                driver.full_name()
            )),
        ),
        driver_snapshot(driver),
        StateSnapshot::new(String::from("driver=none")),
        driver_id,
    )
}

/// Validates a new account and builds its audit event.
///
/// # Errors
///
/// Returns an error if the login or display name is invalid.
pub fn register_account(
    login_name: &str,
    display_name: &str,
    actor: Actor,
    cause: Cause,
) -> Result<AuditEvent, CoreError> {
    validate_account_fields(login_name, display_name)?;

    Ok(AuditEvent::new_global(
        actor,
        cause,
        Action::new(
            String::from("CreateAccount"),
            Some(format!("Created account '{}'", login_name.trim())),
        ),
        StateSnapshot::new(String::from("account=none")),
        StateSnapshot::new(format!("account={}", login_name.trim())),
    ))
}

/// Builds the audit event for removing an account.
#[must_use]
pub fn remove_account(account_id: i64, login_name: &str, actor: Actor, cause: Cause) -> AuditEvent {
    AuditEvent::new_global(
        actor,
        cause,
        Action::new(
            String::from("RemoveAccount"),
            Some(format!("Removed account {account_id} ('{login_name}')")),
        ),
        StateSnapshot::new(format!("account={login_name}")),
        StateSnapshot::new(String::from("account=none")),
    )
}

fn driver_snapshot(driver: &Driver) -> StateSnapshot {
    StateSnapshot::new(format!(
        "name={},phone={},email={},active={}",
        driver.full_name(),
        driver.phone,
        driver.email,
        driver.active
    ))
}

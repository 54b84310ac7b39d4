// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Driver registry and account provisioning.

use taxi_ledger::DriverTransition;
use taxi_ledger_audit::{Actor, AuditEvent, Cause};
use taxi_ledger_domain::{DomainError, Driver, Principal, Scope};
use taxi_ledger_persistence::{AccountData, NewAccount, Persistence};
use tracing::info;

use crate::auth::{AuthorizationService, to_audit_actor};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::scope::visible_drivers;

fn require_driver_record(
    persistence: &mut Persistence,
    driver_id: i64,
) -> Result<Driver, ApiError> {
    persistence.get_driver(driver_id)?.ok_or_else(|| {
        ApiError::not_found("Driver", format!("Driver {driver_id} does not exist"))
    })
}

/// Loads a driver and checks that it may still record shifts.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown driver and `Unauthorized` for
/// a deactivated one.
pub(crate) fn ensure_active_driver(
    persistence: &mut Persistence,
    driver_id: i64,
) -> Result<Driver, ApiError> {
    let driver: Driver = require_driver_record(persistence, driver_id)?;
    if !driver.active {
        return Err(translate_domain_error(DomainError::DriverInactive { driver_id }));
    }
    Ok(driver)
}

/// Resolves the principal of a stored account.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the account does not exist.
pub fn load_principal(
    persistence: &mut Persistence,
    account_id: i64,
) -> Result<Principal, ApiError> {
    let account: AccountData = persistence.get_account(account_id)?.ok_or_else(|| {
        ApiError::not_found("Account", format!("Account {account_id} does not exist"))
    })?;

    Ok(Principal::new(
        account.account_id,
        account.is_super_admin,
        account.is_staff_admin,
        account.groups,
        account.driver_id,
        account.has_staff_flag,
    ))
}

/// Registers a new active driver.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `principal` - The calling administrator
/// * `first_name` - Given name
/// * `last_name` - Family name
/// * `phone` - Phone number, `+?1?` followed by 9 to 15 digits
/// * `email` - Email address
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - A field fails validation
/// - The email is already registered
pub fn register_driver(
    persistence: &mut Persistence,
    principal: &Principal,
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
    cause: Cause,
) -> Result<Driver, ApiError> {
    AuthorizationService::authorize_administration(principal, "register_driver")?;

    let transition: DriverTransition = taxi_ledger::register_driver(
        first_name,
        last_name,
        phone,
        email,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;

    let DriverTransition {
        mut driver,
        mut audit_event,
    } = transition;

    let driver_id: i64 = persistence.transaction(|tx| -> Result<i64, ApiError> {
        let driver_id: i64 = tx.insert_driver(&driver)?;
        audit_event.driver_id = Some(driver_id);
        tx.persist_audit_event(&audit_event)?;
        Ok(driver_id)
    })?;

    driver.driver_id = Some(driver_id);
    info!(driver_id, "Registered driver");
    Ok(driver)
}

/// Enables or disables a driver. History is kept either way.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator or the driver
/// does not exist.
pub fn set_driver_active(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    active: bool,
    cause: Cause,
) -> Result<Driver, ApiError> {
    AuthorizationService::authorize_administration(principal, "set_driver_active")?;
    let driver: Driver = require_driver_record(persistence, driver_id)?;

    let transition: DriverTransition = taxi_ledger::set_driver_active(
        driver_id,
        &driver,
        active,
        to_audit_actor(principal),
        cause,
    );

    persistence.transaction(|tx| -> Result<(), ApiError> {
        tx.update_driver_active(driver_id, active)?;
        tx.persist_audit_event(&transition.audit_event)?;
        Ok(())
    })?;

    info!(driver_id, active, "Changed driver activity");
    Ok(transition.driver)
}

/// Deletes a driver and every record it owns.
///
/// The audit trail of the driver is kept.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator or the driver
/// does not exist.
pub fn remove_driver(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_administration(principal, "remove_driver")?;
    let driver: Driver = require_driver_record(persistence, driver_id)?;
    let audit_event: AuditEvent =
        taxi_ledger::remove_driver(driver_id, &driver, to_audit_actor(principal), cause);

    persistence.transaction(|tx| -> Result<(), ApiError> {
        tx.delete_driver(driver_id)?;
        tx.persist_audit_event(&audit_event)?;
        Ok(())
    })
}

/// Lists the drivers the caller can see, by name.
///
/// A driver without visibility over others sees only themselves.
///
/// # Errors
///
/// Returns an error if the lookup fails.
pub fn list_drivers(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<Driver>, ApiError> {
    let scope: Scope = visible_drivers(persistence, principal)?;
    let ids: Option<Vec<i64>> = match (scope.driver_filter(), principal.linked_driver_id()) {
        (Some(mut ids), Some(own)) => {
            if !ids.contains(&own) {
                ids.push(own);
            }
            Some(ids)
        }
        (filter, _) => filter,
    };
    Ok(persistence.list_drivers(ids.as_deref())?)
}

/// Provisions an account.
///
/// Authentication is external; this only records who the account is and
/// which flags and groups it carries.
///
/// # Errors
///
/// Returns an error if:
/// - The caller is not an administrator
/// - The login or display name is invalid
/// - The login is already taken
/// - The linked driver does not exist
pub fn create_account(
    persistence: &mut Persistence,
    principal: &Principal,
    mut account: NewAccount,
    cause: Cause,
) -> Result<i64, ApiError> {
    AuthorizationService::authorize_administration(principal, "create_account")?;

    let audit_event: AuditEvent = taxi_ledger::register_account(
        &account.login_name,
        &account.display_name,
        to_audit_actor(principal),
        cause,
    )
    .map_err(translate_core_error)?;
    account.login_name = account.login_name.trim().to_string();
    account.display_name = account.display_name.trim().to_string();

    if let Some(driver_id) = account.driver_id {
        require_driver_record(persistence, driver_id)?;
    }

    let account_id: i64 = persistence.transaction(|tx| -> Result<i64, ApiError> {
        let account_id: i64 = tx.insert_account(&account)?;
        tx.persist_audit_event(&audit_event)?;
        Ok(account_id)
    })?;

    info!(account_id, "Provisioned account");
    Ok(account_id)
}

/// Removes an account.
///
/// Assignment edges where the account supervises are deleted; references
/// to it as creator or reviewer are cleared.
///
/// # Errors
///
/// Returns an error if the caller is not an administrator or the account
/// does not exist.
pub fn remove_account(
    persistence: &mut Persistence,
    principal: &Principal,
    account_id: i64,
    cause: Cause,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_administration(principal, "remove_account")?;
    let account: AccountData = persistence.get_account(account_id)?.ok_or_else(|| {
        ApiError::not_found("Account", format!("Account {account_id} does not exist"))
    })?;

    let actor: Actor = to_audit_actor(principal);
    let audit_event: AuditEvent =
        taxi_ledger::remove_account(account_id, &account.login_name, actor, cause);

    persistence.transaction(|tx| -> Result<(), ApiError> {
        tx.delete_account(account_id)?;
        tx.persist_audit_event(&audit_event)?;
        Ok(())
    })
}

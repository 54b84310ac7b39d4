// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization checks and audit attribution.
//!
//! Every check runs against a [`Principal`] that was resolved once by the
//! identity layer. Role is never re-derived from account flags here.

use taxi_ledger_audit::Actor;
use taxi_ledger_domain::{Principal, Scope};

use crate::error::AuthError;

/// Converts a principal into the audit actor that attributes its writes.
#[must_use]
pub fn to_audit_actor(principal: &Principal) -> Actor {
    Actor::with_account(
        format!("account-{}", principal.account_id()),
        principal.role().as_str().to_string(),
        principal.account_id(),
    )
}

/// Authorization service for role- and scope-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks that the principal is a super or staff administrator.
    ///
    /// Assignment management, the driver registry and account provisioning
    /// all require this. Staff-flag drivers do not qualify.
    ///
    /// # Arguments
    ///
    /// * `principal` - The caller
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for any other role.
    pub fn authorize_administration(principal: &Principal, action: &str) -> Result<(), AuthError> {
        if principal.role().is_administrator() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("administrator"),
            })
        }
    }

    /// Returns the driver linked to the principal.
    ///
    /// Shift operations, modification requests and manual breakdown reports
    /// are performed by a driver on their own records.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` if the account has no linked driver.
    pub fn require_driver(principal: &Principal, action: &str) -> Result<i64, AuthError> {
        principal
            .linked_driver_id()
            .ok_or_else(|| AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("driver"),
            })
    }

    /// Checks that a driver lies inside a visible scope.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::OutOfScope` if the scope does not contain the driver.
    pub fn authorize_visible(scope: &Scope, driver_id: i64, action: &str) -> Result<(), AuthError> {
        if scope.contains(driver_id) {
            Ok(())
        } else {
            Err(AuthError::OutOfScope {
                action: action.to_string(),
                driver_id,
            })
        }
    }
}

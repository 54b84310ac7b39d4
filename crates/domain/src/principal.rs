// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principals, roles, and driver visibility scopes.
//!
//! A [`Principal`] is built once per request from the identity layer's
//! account flags. Its [`Role`] is resolved at construction and business
//! logic only ever consults the role, never the raw flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Group whose members supervise assigned drivers.
pub const SUPERVISOR_GROUP: &str = "supervisors";

/// The resolved role of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrator.
    SuperAdmin,
    /// Staff administrator; same visibility as a super administrator.
    StaffAdmin,
    /// Supervisor-group member; sees assigned drivers only.
    Supervisor,
    /// Driver account carrying the staff flag; sees every driver.
    ElevatedDriver,
    /// Driver account; acts on its own records only.
    Driver,
    /// Authenticated account with no ledger role.
    Anonymous,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::StaffAdmin => "staff_admin",
            Self::Supervisor => "supervisor",
            Self::ElevatedDriver => "elevated_driver",
            Self::Driver => "driver",
            Self::Anonymous => "anonymous",
        }
    }

    /// Returns true for roles that may manage assignments, drivers and accounts.
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        matches!(self, Self::SuperAdmin | Self::StaffAdmin)
    }

    /// Returns true for roles whose visibility covers every driver.
    #[must_use]
    pub const fn sees_all_drivers(&self) -> bool {
        matches!(
            self,
            Self::SuperAdmin | Self::StaffAdmin | Self::ElevatedDriver
        )
    }
}

/// The caller of a ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    account_id: i64,
    is_super_admin: bool,
    is_staff_admin: bool,
    group_memberships: BTreeSet<String>,
    linked_driver_id: Option<i64>,
    has_staff_flag: bool,
    role: Role,
}

impl Principal {
    /// Creates a principal from identity-layer flags and resolves its role.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The authenticated account
    /// * `is_super_admin` - Super administrator flag
    /// * `is_staff_admin` - Staff administrator flag
    /// * `group_memberships` - Group names the account belongs to
    /// * `linked_driver_id` - The driver record linked to the account, if any
    /// * `has_staff_flag` - Staff elevation flag
    #[must_use]
    #[allow(clippy::fn_params_excessive_bools)]
    pub fn new(
        account_id: i64,
        is_super_admin: bool,
        is_staff_admin: bool,
        group_memberships: BTreeSet<String>,
        linked_driver_id: Option<i64>,
        has_staff_flag: bool,
    ) -> Self {
        let role: Role = resolve_role(
            is_super_admin,
            is_staff_admin,
            group_memberships.contains(SUPERVISOR_GROUP),
            linked_driver_id.is_some(),
            has_staff_flag,
        );
        Self {
            account_id,
            is_super_admin,
            is_staff_admin,
            group_memberships,
            linked_driver_id,
            has_staff_flag,
            role,
        }
    }

    #[must_use]
    pub const fn account_id(&self) -> i64 {
        self.account_id
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn linked_driver_id(&self) -> Option<i64> {
        self.linked_driver_id
    }

    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        self.is_super_admin
    }

    #[must_use]
    pub const fn is_staff_admin(&self) -> bool {
        self.is_staff_admin
    }

    #[must_use]
    pub const fn has_staff_flag(&self) -> bool {
        self.has_staff_flag
    }

    #[must_use]
    pub const fn group_memberships(&self) -> &BTreeSet<String> {
        &self.group_memberships
    }
}

/// Resolves the role from raw identity flags, in precedence order.
///
/// A supervisor carrying the staff flag is elevated to staff administrator.
/// An account with the staff flag but no driver link is likewise treated as
/// a staff administrator.
#[allow(clippy::fn_params_excessive_bools)]
const fn resolve_role(
    is_super_admin: bool,
    is_staff_admin: bool,
    in_supervisor_group: bool,
    has_driver: bool,
    has_staff_flag: bool,
) -> Role {
    if is_super_admin {
        Role::SuperAdmin
    } else if is_staff_admin {
        Role::StaffAdmin
    } else if in_supervisor_group {
        if has_staff_flag {
            Role::StaffAdmin
        } else {
            Role::Supervisor
        }
    } else if has_driver {
        if has_staff_flag {
            Role::ElevatedDriver
        } else {
            Role::Driver
        }
    } else if has_staff_flag {
        Role::StaffAdmin
    } else {
        Role::Anonymous
    }
}

/// The set of drivers a principal may observe or act upon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every driver, including ones registered later.
    All,
    /// Exactly these drivers.
    Drivers(BTreeSet<i64>),
}

impl Scope {
    /// The empty scope.
    #[must_use]
    pub const fn none() -> Self {
        Self::Drivers(BTreeSet::new())
    }

    #[must_use]
    pub fn contains(&self, driver_id: i64) -> bool {
        match self {
            Self::All => true,
            Self::Drivers(ids) => ids.contains(&driver_id),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::All => false,
            Self::Drivers(ids) => ids.is_empty(),
        }
    }

    /// Returns the containment filter to apply to a query, `None` meaning
    /// no restriction.
    #[must_use]
    pub fn driver_filter(&self) -> Option<Vec<i64>> {
        match self {
            Self::All => None,
            Self::Drivers(ids) => Some(ids.iter().copied().collect()),
        }
    }
}

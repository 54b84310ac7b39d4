// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visibility scope resolution.
//!
//! Every read of driver-owned records goes through [`scoped_query`], which
//! intersects the caller's filter with the drivers the caller may see.

use std::collections::BTreeSet;
use taxi_ledger_domain::{
    BreakdownReport, CheckIn, CheckOut, ModificationRequest, Principal, Role, Scope,
};
use taxi_ledger_persistence::{BreakdownFilter, Persistence, RequestFilter, ShiftFilter};
use tracing::debug;

use crate::auth::AuthorizationService;
use crate::error::ApiError;

/// Computes the drivers a principal may observe.
///
/// Administrators and staff-flag drivers see everyone. Supervisors see the
/// drivers they have an active assignment to. Everyone else sees nobody,
/// including a plain driver, whose own records are reached through the
/// driver-only operations instead.
///
/// # Errors
///
/// Returns an error if the assignment lookup fails.
pub fn visible_drivers(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Scope, ApiError> {
    let role: Role = principal.role();
    if role.sees_all_drivers() {
        return Ok(Scope::All);
    }
    if role == Role::Supervisor {
        let assigned: BTreeSet<i64> = persistence.assigned_driver_ids(principal.account_id())?;
        debug!(
            account_id = principal.account_id(),
            assigned = assigned.len(),
            "Resolved supervisor scope"
        );
        return Ok(Scope::Drivers(assigned));
    }
    Ok(Scope::none())
}

/// Checks that a principal may read one driver's records.
///
/// A driver may always read their own records. Anyone else needs the driver
/// in their visible scope.
///
/// # Errors
///
/// Returns `ApiError::Unauthorized` if the driver is out of reach.
pub fn authorize_driver_records(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    action: &str,
) -> Result<(), ApiError> {
    if principal.linked_driver_id() == Some(driver_id) {
        return Ok(());
    }
    let scope: Scope = visible_drivers(persistence, principal)?;
    AuthorizationService::authorize_visible(&scope, driver_id, action)?;
    Ok(())
}

/// A record listing with its caller-supplied filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordQuery {
    CheckIns(ShiftFilter),
    CheckOuts(ShiftFilter),
    Requests(RequestFilter),
    Breakdowns(BreakdownFilter),
}

/// Records returned by [`scoped_query`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopedRecords {
    CheckIns(Vec<CheckIn>),
    CheckOuts(Vec<CheckOut>),
    Requests(Vec<ModificationRequest>),
    Breakdowns(Vec<BreakdownReport>),
}

impl ScopedRecords {
    /// Number of records returned.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::CheckIns(rows) => rows.len(),
            Self::CheckOuts(rows) => rows.len(),
            Self::Requests(rows) => rows.len(),
            Self::Breakdowns(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Driver of every returned record, in order.
    #[must_use]
    pub fn driver_ids(&self) -> Vec<i64> {
        match self {
            Self::CheckIns(rows) => rows.iter().map(|r| r.driver_id).collect(),
            Self::CheckOuts(rows) => rows.iter().map(|r| r.driver_id).collect(),
            Self::Requests(rows) => rows.iter().map(|r| r.driver_id).collect(),
            Self::Breakdowns(rows) => rows.iter().map(|r| r.driver_id).collect(),
        }
    }
}

/// Narrows a requested driver list to a scope.
///
/// `None` on both sides stays unrestricted. An empty result matches nothing.
pub(crate) fn restrict(requested: Option<Vec<i64>>, scope: &Scope) -> Option<Vec<i64>> {
    match (requested, scope.driver_filter()) {
        (None, allowed) => allowed,
        (Some(ids), None) => Some(ids),
        (Some(ids), Some(allowed)) => Some(
            ids.into_iter()
                .filter(|id| allowed.contains(id))
                .collect(),
        ),
    }
}

/// Lists records of one kind, contained to the principal's visible drivers.
///
/// The caller's filter is applied on top of the scope and can only narrow it.
///
/// # Errors
///
/// Returns an error if scope resolution or the listing fails.
pub fn scoped_query(
    persistence: &mut Persistence,
    principal: &Principal,
    query: RecordQuery,
) -> Result<ScopedRecords, ApiError> {
    let scope: Scope = visible_drivers(persistence, principal)?;

    let records: ScopedRecords = match query {
        RecordQuery::CheckIns(mut filter) => {
            filter.driver_ids = restrict(filter.driver_ids, &scope);
            ScopedRecords::CheckIns(persistence.list_check_ins(&filter)?)
        }
        RecordQuery::CheckOuts(mut filter) => {
            filter.driver_ids = restrict(filter.driver_ids, &scope);
            ScopedRecords::CheckOuts(persistence.list_check_outs(&filter)?)
        }
        RecordQuery::Requests(mut filter) => {
            filter.driver_ids = restrict(filter.driver_ids, &scope);
            ScopedRecords::Requests(persistence.list_modification_requests(&filter)?)
        }
        RecordQuery::Breakdowns(mut filter) => {
            filter.driver_ids = restrict(filter.driver_ids, &scope);
            ScopedRecords::Breakdowns(persistence.list_breakdown_reports(&filter)?)
        }
    };

    Ok(records)
}

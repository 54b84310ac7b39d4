// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-process boundary of the taxi shift ledger.
//!
//! Every operation takes an already-resolved [`Principal`], checks it before
//! reading or writing driver data, runs the pure core transition and stores
//! the result together with its audit event. Callers receive plain data or
//! an [`ApiError`] whose message can be shown as-is.
//!
//! [`Principal`]: taxi_ledger_domain::Principal

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod assignments;
mod auth;
mod breakdowns;
mod config;
mod error;
mod ledger;
mod registry;
mod reports;
mod request_response;
mod scope;
mod workflow;

#[cfg(test)]
mod tests;

pub use assignments::{assign, replace_assignments, unassign, unassign_all};
pub use auth::{AuthorizationService, to_audit_actor};
pub use breakdowns::{
    BreakdownRegister, IssueSink, dispatch_events, report_breakdown, update_breakdown_status,
};
pub use config::{ConfigError, LedgerConfig};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use ledger::{
    close_shift, day_eligibility, get_shift_state, open_shift, reconcile_shift, shift_history,
};
pub use registry::{
    create_account, list_drivers, load_principal, register_driver, remove_account, remove_driver,
    set_driver_active,
};
pub use reports::{audit_trail, revenue_summary};
pub use request_response::{
    BatchFailure, BatchResult, CloseShiftRequest, CloseShiftResult, DriverRevenue,
    OpenShiftRequest, Outcome, RevenueSummary, SubmitModificationRequest,
};
pub use scope::{
    RecordQuery, ScopedRecords, authorize_driver_records, scoped_query, visible_drivers,
};
pub use workflow::{decide, list_my_requests, list_pending_requests, submit};

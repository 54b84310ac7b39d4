// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift ledger operations.
//!
//! Opening and closing a shift load the driver's day, apply the core
//! transition and insert the new record in one transaction. The unique
//! `(driver, date)` constraint backs up the in-transaction existence check
//! against a concurrent writer. Issue events are dispatched after commit.

use taxi_ledger::{Command, LedgerEvent, ShiftDay, ShiftSummary, ShiftTransition};
use taxi_ledger_audit::{Actor, Cause};
use taxi_ledger_domain::{
    BusinessClock, CheckIn, CheckOut, DayEligibility, DomainError, LocalMoment, Principal,
    Reconciliation, ShiftState, classify,
};
use taxi_ledger_persistence::{Persistence, ShiftFilter};
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthorizationService, to_audit_actor};
use crate::breakdowns::{IssueSink, dispatch_events};
use crate::error::{ApiError, conflict_on_unique, translate_core_error, translate_domain_error};
use crate::registry::ensure_active_driver;
use crate::request_response::{CloseShiftRequest, CloseShiftResult, OpenShiftRequest, Outcome};
use crate::scope::authorize_driver_records;

fn local_moment(clock: &BusinessClock, now: OffsetDateTime) -> Result<LocalMoment, ApiError> {
    clock.local(now).map_err(translate_domain_error)
}

/// Opens a shift for the calling driver.
///
/// The time of day is taken from `now` in the fleet's timezone.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `clock` - The fleet's business clock
/// * `sink` - Receives the issue event when the note reports a problem
/// * `principal` - The calling driver
/// * `request` - The check-in details
/// * `now` - Current instant
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// The stored check-in, with a warning if a breakdown report could not be
/// filed for its issue note.
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not linked to a driver, or the driver is inactive
/// - A check-in already exists for the date (`AlreadyOpen`)
/// - The target, signature or note is invalid
pub fn open_shift(
    persistence: &mut Persistence,
    clock: &BusinessClock,
    sink: &mut dyn IssueSink,
    principal: &Principal,
    request: OpenShiftRequest,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<Outcome<CheckIn>, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "open_shift")?;
    ensure_active_driver(persistence, driver_id)?;

    let actor: Actor = to_audit_actor(principal);
    let local: LocalMoment = local_moment(clock, now)?;
    let shift_date: Date = request.shift_date;

    let command: Command = Command::OpenShift {
        time_of_day: local.time,
        target: request.target,
        fuel_full: request.fuel_full,
        issue_note: request.issue_note,
        signature: request.signature,
        recorded_at: now,
    };

    let (check_in, events): (CheckIn, Vec<LedgerEvent>) =
        persistence.transaction(|tx| -> Result<(CheckIn, Vec<LedgerEvent>), ApiError> {
            let day: ShiftDay = tx.load_shift_day(driver_id, shift_date)?;
            let transition: ShiftTransition =
                taxi_ledger::apply(&day, command, actor.clone(), cause.clone())
                    .map_err(translate_core_error)?;

            let mut check_in: CheckIn = transition.new_day.check_in.ok_or_else(|| {
                ApiError::Internal {
                    message: String::from("Open shift produced no check-in"),
                }
            })?;
            let check_in_id: i64 = tx.insert_check_in(&check_in).map_err(|e| {
                conflict_on_unique(
                    e,
                    DomainError::AlreadyOpen {
                        driver_id,
                        date: shift_date,
                    },
                )
            })?;
            check_in.check_in_id = Some(check_in_id);
            tx.persist_audit_event(&transition.audit_event)?;

            Ok((check_in, transition.events))
        })?;

    info!(
        driver_id,
        check_in_id = check_in.check_in_id,
        target = check_in.target,
        "Opened shift"
    );

    let warnings: Vec<String> = dispatch_events(persistence, sink, &events, &actor, &cause, now);
    Ok(Outcome {
        value: check_in,
        warnings,
    })
}

/// Closes the calling driver's open shift and reconciles it.
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not linked to a driver, or the driver is inactive
/// - No check-in exists for the date (`NoOpenShift`)
/// - A check-out already exists for the date (`AlreadyClosed`)
/// - The realized amount, signature or note is invalid
pub fn close_shift(
    persistence: &mut Persistence,
    clock: &BusinessClock,
    sink: &mut dyn IssueSink,
    principal: &Principal,
    request: CloseShiftRequest,
    now: OffsetDateTime,
    cause: Cause,
) -> Result<Outcome<CloseShiftResult>, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "close_shift")?;
    ensure_active_driver(persistence, driver_id)?;

    let actor: Actor = to_audit_actor(principal);
    let local: LocalMoment = local_moment(clock, now)?;
    let shift_date: Date = request.shift_date;

    let command: Command = Command::CloseShift {
        time_of_day: local.time,
        realized: request.realized,
        fuel_full: request.fuel_full,
        issue_note: request.issue_note,
        signature: request.signature,
        recorded_at: now,
    };

    let (result, events): (CloseShiftResult, Vec<LedgerEvent>) = persistence.transaction(
        |tx| -> Result<(CloseShiftResult, Vec<LedgerEvent>), ApiError> {
            let day: ShiftDay = tx.load_shift_day(driver_id, shift_date)?;
            let transition: ShiftTransition =
                taxi_ledger::apply(&day, command, actor.clone(), cause.clone())
                    .map_err(translate_core_error)?;

            let target: Option<i64> = transition.new_day.check_in.as_ref().map(|c| c.target);
            let mut check_out: CheckOut = transition.new_day.check_out.ok_or_else(|| {
                ApiError::Internal {
                    message: String::from("Close shift produced no check-out"),
                }
            })?;
            let check_out_id: i64 = tx.insert_check_out(&check_out).map_err(|e| {
                conflict_on_unique(
                    e,
                    DomainError::AlreadyClosed {
                        driver_id,
                        date: shift_date,
                    },
                )
            })?;
            check_out.check_out_id = Some(check_out_id);
            tx.persist_audit_event(&transition.audit_event)?;

            let reconciliation: Reconciliation = classify(target, check_out.realized);
            Ok((
                CloseShiftResult {
                    check_out,
                    reconciliation,
                },
                transition.events,
            ))
        },
    )?;

    info!(
        driver_id,
        check_out_id = result.check_out.check_out_id,
        realized = result.check_out.realized,
        tier = result.reconciliation.tier.as_str(),
        "Closed shift"
    );

    let warnings: Vec<String> = dispatch_events(persistence, sink, &events, &actor, &cause, now);
    Ok(Outcome {
        value: result,
        warnings,
    })
}

/// Returns the state of a driver's shift on a date.
///
/// # Errors
///
/// Returns an error if the caller may not see the driver or the lookup fails.
pub fn get_shift_state(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    shift_date: Date,
) -> Result<ShiftState, ApiError> {
    authorize_driver_records(persistence, principal, driver_id, "get_shift_state")?;
    let day: ShiftDay = persistence.load_shift_day(driver_id, shift_date)?;
    Ok(day.state())
}

/// Reports whether the calling driver may open or close a shift right now.
///
/// Today is the local date of `now`. Opening additionally requires the
/// local hour to have reached the configured start of the business day.
///
/// # Errors
///
/// Returns an error if the principal is not linked to a driver or the
/// lookup fails.
pub fn day_eligibility(
    persistence: &mut Persistence,
    clock: &BusinessClock,
    principal: &Principal,
    now: OffsetDateTime,
) -> Result<DayEligibility, ApiError> {
    let driver_id: i64 = AuthorizationService::require_driver(principal, "day_eligibility")?;
    let local: LocalMoment = local_moment(clock, now)?;

    let day: ShiftDay = persistence.load_shift_day(driver_id, local.date)?;
    clock
        .eligibility(day.state(), now)
        .map_err(translate_domain_error)
}

/// Lists a driver's shifts between two dates, inclusive, newest first.
///
/// # Errors
///
/// Returns an error if the caller may not see the driver or the lookup fails.
pub fn shift_history(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    from: Option<Date>,
    to: Option<Date>,
) -> Result<Vec<ShiftSummary>, ApiError> {
    authorize_driver_records(persistence, principal, driver_id, "shift_history")?;

    let filter: ShiftFilter = ShiftFilter {
        driver_ids: Some(vec![driver_id]),
        from,
        to,
    };
    let days: Vec<ShiftDay> = persistence.list_shift_days(&filter)?;
    Ok(days.iter().map(ShiftDay::summary).collect())
}

/// Reconciles a stored check-out against its check-in.
///
/// The tier is `UNKNOWN` when the check-in is missing.
///
/// # Errors
///
/// Returns an error if the caller may not see the driver or no check-out
/// exists for the date.
pub fn reconcile_shift(
    persistence: &mut Persistence,
    principal: &Principal,
    driver_id: i64,
    shift_date: Date,
) -> Result<Reconciliation, ApiError> {
    authorize_driver_records(persistence, principal, driver_id, "reconcile_shift")?;

    let day: ShiftDay = persistence.load_shift_day(driver_id, shift_date)?;
    day.reconcile().ok_or_else(|| {
        ApiError::not_found(
            "CheckOut",
            format!("Driver {driver_id} has no check-out on {shift_date}"),
        )
    })
}

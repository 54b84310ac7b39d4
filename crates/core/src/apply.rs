// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::event::{LedgerEvent, issue_event};
use crate::state::{ShiftDay, ShiftTransition};
use taxi_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use taxi_ledger_domain::{
    BreakdownOrigin, CheckIn, CheckOut, DomainError, IssueNote, Severity, validate_issue_note,
    validate_realized, validate_signature, validate_target,
};

/// Applies a shift command to a driver's day, producing a new day and audit event.
///
/// This function is pure. The conflict checks here are mirrored by the
/// uniqueness constraints in storage, which remain the backstop for
/// concurrent writers.
///
/// # Arguments
///
/// * `day` - The current records for the driver and date (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(ShiftTransition)` containing the new day, audit event and any
///   issue event to dispatch after commit
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A check-in already exists when opening (`AlreadyOpen`)
/// - No check-in exists when closing (`NoOpenShift`)
/// - A check-out already exists when closing (`AlreadyClosed`)
/// - The target, realized amount, signature or note is invalid
pub fn apply(
    day: &ShiftDay,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<ShiftTransition, CoreError> {
    let action_name: &'static str = command.name();
    let before: StateSnapshot = day.snapshot();
    let mut new_day: ShiftDay = day.clone();

    let (details, event): (String, Option<LedgerEvent>) = match command {
        Command::OpenShift {
            time_of_day,
            target,
            fuel_full,
            issue_note,
            signature,
            recorded_at,
        } => {
            if day.check_in.is_some() {
                return Err(CoreError::DomainViolation(DomainError::AlreadyOpen {
                    driver_id: day.driver_id,
                    date: day.shift_date,
                }));
            }

            validate_target(target)?;
            validate_signature(&signature)?;
            validate_issue_note(&issue_note)?;

            let note: IssueNote = IssueNote::new(&issue_note);
            let event: Option<LedgerEvent> = issue_event(
                day.driver_id,
                day.shift_date,
                &note,
                Severity::Minor,
                BreakdownOrigin::CheckIn,
            );

            new_day.check_in = Some(CheckIn {
                check_in_id: None,
                driver_id: day.driver_id,
                shift_date: day.shift_date,
                time_of_day,
                target,
                fuel_full,
                issue_note: note,
                signature,
                created_at: recorded_at,
            });

            (
                format!("Checked in at {time_of_day} with target {target}"),
                event,
            )
        }
        Command::CloseShift {
            time_of_day,
            realized,
            fuel_full,
            issue_note,
            signature,
            recorded_at,
        } => {
            if day.check_in.is_none() {
                return Err(CoreError::DomainViolation(DomainError::NoOpenShift {
                    driver_id: day.driver_id,
                    date: day.shift_date,
                }));
            }
            if day.check_out.is_some() {
                return Err(CoreError::DomainViolation(DomainError::AlreadyClosed {
                    driver_id: day.driver_id,
                    date: day.shift_date,
                }));
            }

            validate_realized(realized)?;
            validate_signature(&signature)?;
            validate_issue_note(&issue_note)?;

            let note: IssueNote = IssueNote::new(&issue_note);
            let event: Option<LedgerEvent> = issue_event(
                day.driver_id,
                day.shift_date,
                &note,
                Severity::Minor,
                BreakdownOrigin::CheckOut,
            );

            new_day.check_out = Some(CheckOut {
                check_out_id: None,
                driver_id: day.driver_id,
                shift_date: day.shift_date,
                time_of_day,
                realized,
                fuel_full,
                issue_note: note,
                signature,
                created_at: recorded_at,
            });

            (
                format!("Checked out at {time_of_day} with realized {realized}"),
                event,
            )
        }
    };

    let after: StateSnapshot = new_day.snapshot();
    let action: Action = Action::new(action_name.to_string(), Some(details));
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after, day.driver_id);

    Ok(ShiftTransition {
        new_day,
        audit_event,
        events: event.into_iter().collect(),
    })
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of a mechanical-issue note, in characters.
pub const MAX_ISSUE_NOTE_LEN: usize = 200;

/// Maximum length of a driver or account name, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Validates a declared revenue target.
///
/// # Errors
///
/// Returns `DomainError::InvalidTarget` if the target is not strictly positive.
pub const fn validate_target(target: i64) -> Result<(), DomainError> {
    if target <= 0 {
        return Err(DomainError::InvalidTarget { target });
    }
    Ok(())
}

/// Validates realized revenue.
///
/// # Errors
///
/// Returns `DomainError::InvalidRealized` if the amount is negative.
pub const fn validate_realized(realized: i64) -> Result<(), DomainError> {
    if realized < 0 {
        return Err(DomainError::InvalidRealized { realized });
    }
    Ok(())
}

/// Validates that a signature blob was captured.
///
/// # Errors
///
/// Returns `DomainError::MissingSignature` if the blob is empty or blank.
pub fn validate_signature(signature: &str) -> Result<(), DomainError> {
    if signature.trim().is_empty() {
        return Err(DomainError::MissingSignature);
    }
    Ok(())
}

/// Validates a mechanical-issue note.
///
/// # Errors
///
/// Returns `DomainError::InvalidIssueNote` if the note is too long.
pub fn validate_issue_note(note: &str) -> Result<(), DomainError> {
    let len: usize = note.trim().chars().count();
    if len > MAX_ISSUE_NOTE_LEN {
        return Err(DomainError::InvalidIssueNote(format!(
            "note is {len} characters long, the limit is {MAX_ISSUE_NOTE_LEN}"
        )));
    }
    Ok(())
}

/// Validates a modification request justification.
///
/// # Errors
///
/// Returns `DomainError::MissingJustification` if it is blank.
pub fn validate_justification(justification: &str) -> Result<(), DomainError> {
    if justification.trim().is_empty() {
        return Err(DomainError::MissingJustification);
    }
    Ok(())
}

/// Validates a repair cost.
///
/// # Errors
///
/// Returns `DomainError::InvalidRepairCost` if the cost is negative.
pub const fn validate_repair_cost(cost: i64) -> Result<(), DomainError> {
    if cost < 0 {
        return Err(DomainError::InvalidRepairCost { cost });
    }
    Ok(())
}

fn validate_name(label: &str, value: &str) -> Result<(), DomainError> {
    let trimmed: &str = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(format!("{label} cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "{label} cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a phone number: an optional `+`, an optional leading `1`, then
/// 9 to 15 digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the number does not match.
pub fn validate_phone(phone: &str) -> Result<(), DomainError> {
    let digits: &str = phone.strip_prefix('+').unwrap_or(phone);
    let all_digits: bool = !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
    let len: usize = digits.len();
    let valid_len: bool = (9..=15).contains(&len) || (len == 16 && digits.starts_with('1'));

    if all_digits && valid_len {
        Ok(())
    } else {
        Err(DomainError::InvalidPhone(format!(
            "'{phone}' must be 9 to 15 digits, optionally prefixed with '+'"
        )))
    }
}

/// Validates an email address.
///
/// This is a shape check only: one `@`, a non-empty local part, and a
/// dotted domain.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidEmail(format!("'{email}' is not a valid address"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let dotted: bool = domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if !dotted {
        return Err(invalid());
    }
    Ok(())
}

/// Validates the personal data of a driver.
///
/// # Errors
///
/// Returns the first failing field's error.
pub fn validate_driver_fields(
    first_name: &str,
    last_name: &str,
    phone: &str,
    email: &str,
) -> Result<(), DomainError> {
    validate_name("First name", first_name)?;
    validate_name("Last name", last_name)?;
    validate_phone(phone)?;
    validate_email(email)?;
    Ok(())
}

/// Validates an account's login and display names.
///
/// # Errors
///
/// * `InvalidLoginName` if the login is blank or contains whitespace
/// * `InvalidName` if the display name is blank or too long
pub fn validate_account_fields(login_name: &str, display_name: &str) -> Result<(), DomainError> {
    if login_name.is_empty() || login_name.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidLoginName(format!(
            "'{login_name}' must be non-empty and contain no whitespace"
        )));
    }
    validate_name("Display name", display_name)
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{NewAccount, flag};
use crate::diesel_schema::{account_groups, accounts};
use crate::error::PersistenceError;

/// Creates an account together with its group memberships.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `account` - The account to provision
///
/// # Errors
///
/// Returns `UniqueViolation` if the login name is taken or the driver is
/// already linked to another account.
pub fn insert_account(
    conn: &mut SqliteConnection,
    account: &NewAccount,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(accounts::table)
        .values((
            accounts::login_name.eq(&account.login_name),
            accounts::display_name.eq(&account.display_name),
            accounts::is_super_admin.eq(flag(account.is_super_admin)),
            accounts::is_staff_admin.eq(flag(account.is_staff_admin)),
            accounts::has_staff_flag.eq(flag(account.has_staff_flag)),
            accounts::driver_id.eq(account.driver_id),
        ))
        .execute(conn)?;

    let account_id: i64 = conn.get_last_insert_rowid()?;

    for group in &account.groups {
        diesel::insert_into(account_groups::table)
            .values((
                account_groups::account_id.eq(account_id),
                account_groups::group_name.eq(group),
            ))
            .execute(conn)?;
    }

    info!(account_id, login_name = %account.login_name, "Account created");
    Ok(account_id)
}

/// Deletes an account. Group memberships and supervision edges go with it.
///
/// # Errors
///
/// Returns `NotFound` if no account has this identifier.
pub fn delete_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(accounts::table.filter(accounts::account_id.eq(account_id))).execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Account {account_id}")));
    }
    info!(account_id, "Account removed");
    Ok(())
}

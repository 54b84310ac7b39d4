// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

use crate::data_models::AccountData;
use crate::diesel_schema::{account_groups, accounts};
use crate::error::PersistenceError;

/// Diesel Queryable struct for account rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
struct AccountRow {
    account_id: i64,
    login_name: String,
    display_name: String,
    is_super_admin: i32,
    is_staff_admin: i32,
    has_staff_flag: i32,
    driver_id: Option<i64>,
    created_at: String,
}

/// Retrieves an account and its group memberships.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account does not exist.
pub fn get_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<AccountData>, PersistenceError> {
    debug!(account_id, "Looking up account");

    let Some(row) = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first::<AccountRow>(conn)
        .optional()?
    else {
        return Ok(None);
    };

    let groups: Vec<String> = account_groups::table
        .filter(account_groups::account_id.eq(account_id))
        .select(account_groups::group_name)
        .load(conn)?;

    Ok(Some(AccountData {
        account_id: row.account_id,
        login_name: row.login_name,
        display_name: row.display_name,
        is_super_admin: row.is_super_admin != 0,
        is_staff_admin: row.is_staff_admin != 0,
        has_staff_flag: row.has_staff_flag != 0,
        driver_id: row.driver_id,
        groups: groups.into_iter().collect::<BTreeSet<String>>(),
        created_at: row.created_at,
    }))
}

/// Counts the accounts in the database.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_accounts(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(accounts::table.count().get_result(conn)?)
}

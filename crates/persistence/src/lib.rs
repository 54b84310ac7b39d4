// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the taxi shift ledger.
//!
//! This crate stores drivers, accounts, shift records, modification
//! requests, assignment edges, breakdown reports and the audit trail in
//! `SQLite` through Diesel.
//!
//! ## Storage Guarantees
//!
//! - At most one check-in and one check-out per `(driver, date)`, enforced
//!   by unique constraints so concurrent submissions cannot both succeed
//! - A check-out cannot exist without the matching check-in
//! - At most one assignment edge per `(driver, supervisor)` pair
//! - Deleting a driver cascades to its records; deleting an account
//!   cascades to its group memberships and supervision edges
//! - Audit events carry no foreign keys and survive every deletion
//!
//! ## Transactions
//!
//! Query and mutation functions each touch one table. Operations that must
//! be atomic, such as applying an approved modification together with its
//! decision, run inside [`Persistence::transaction`].
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller an isolated shared-cache
//! in-memory database with migrations applied.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use diesel::connection::{AnsiTransactionManager, TransactionManager};
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use taxi_ledger::ShiftDay;
use taxi_ledger_audit::AuditEvent;
use taxi_ledger_domain::{
    AssignmentEdge, BreakdownReport, CheckIn, CheckOut, Driver, ModificationRequest,
};
use time::Date;
use tracing::warn;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::sqlite::ForeignKeyInfo;
pub use data_models::{AccountData, BreakdownFilter, NewAccount, RequestFilter, ShiftFilter};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Runs `f` inside a database transaction.
    ///
    /// The transaction commits when `f` returns `Ok` and rolls back when it
    /// returns `Err` or panics. A panic is resumed after the rollback. Nested
    /// calls become savepoints.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or a `PersistenceError` if the
    /// transaction cannot be opened or committed.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        AnsiTransactionManager::begin_transaction(&mut self.conn).map_err(PersistenceError::from)?;

        match panic::catch_unwind(AssertUnwindSafe(|| f(self))) {
            Ok(Ok(value)) => {
                AnsiTransactionManager::commit_transaction(&mut self.conn)
                    .map_err(PersistenceError::from)?;
                Ok(value)
            }
            Ok(Err(err)) => {
                self.rollback_open_transaction();
                Err(err)
            }
            Err(payload) => {
                self.rollback_open_transaction();
                panic::resume_unwind(payload)
            }
        }
    }

    fn rollback_open_transaction(&mut self) {
        if let Err(rollback_err) = AnsiTransactionManager::rollback_transaction(&mut self.conn) {
            warn!(error = %rollback_err, "Transaction rollback failed");
        }
    }

    // ========================================================================
    // Drivers & Accounts
    // ========================================================================

    /// Inserts a driver and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_driver(&mut self, driver: &Driver) -> Result<i64, PersistenceError> {
        mutations::drivers::insert_driver(&mut self.conn, driver)
    }

    /// Retrieves a driver by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_driver(&mut self, driver_id: i64) -> Result<Option<Driver>, PersistenceError> {
        queries::drivers::get_driver(&mut self.conn, driver_id)
    }

    /// Lists drivers by name, restricted to `driver_ids` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_drivers(
        &mut self,
        driver_ids: Option<&[i64]>,
    ) -> Result<Vec<Driver>, PersistenceError> {
        queries::drivers::list_drivers(&mut self.conn, driver_ids)
    }

    /// Returns the identifiers of every driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_driver_ids(&mut self) -> Result<BTreeSet<i64>, PersistenceError> {
        queries::drivers::all_driver_ids(&mut self.conn)
    }

    /// Sets the active flag of a driver.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist.
    pub fn update_driver_active(
        &mut self,
        driver_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::drivers::update_driver_active(&mut self.conn, driver_id, active)
    }

    /// Deletes a driver and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the driver does not exist.
    pub fn delete_driver(&mut self, driver_id: i64) -> Result<(), PersistenceError> {
        mutations::drivers::delete_driver(&mut self.conn, driver_id)
    }

    /// Creates an account with its groups and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the login or the driver link is taken.
    pub fn insert_account(&mut self, account: &NewAccount) -> Result<i64, PersistenceError> {
        mutations::accounts::insert_account(&mut self.conn, account)
    }

    /// Retrieves an account with its groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account(&mut self.conn, account_id)
    }

    /// Counts the accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_accounts(&mut self) -> Result<i64, PersistenceError> {
        queries::accounts::count_accounts(&mut self.conn)
    }

    /// Deletes an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub fn delete_account(&mut self, account_id: i64) -> Result<(), PersistenceError> {
        mutations::accounts::delete_account(&mut self.conn, account_id)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Loads both sides of a driver's shift on a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn load_shift_day(
        &mut self,
        driver_id: i64,
        shift_date: Date,
    ) -> Result<ShiftDay, PersistenceError> {
        queries::shifts::load_shift_day(&mut self.conn, driver_id, shift_date)
    }

    /// Lists shift days matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_shift_days(
        &mut self,
        filter: &ShiftFilter,
    ) -> Result<Vec<ShiftDay>, PersistenceError> {
        queries::shifts::list_shift_days(&mut self.conn, filter)
    }

    /// Lists check-ins matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_check_ins(
        &mut self,
        filter: &ShiftFilter,
    ) -> Result<Vec<CheckIn>, PersistenceError> {
        queries::shifts::list_check_ins(&mut self.conn, filter)
    }

    /// Lists check-outs matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_check_outs(
        &mut self,
        filter: &ShiftFilter,
    ) -> Result<Vec<CheckOut>, PersistenceError> {
        queries::shifts::list_check_outs(&mut self.conn, filter)
    }

    /// Inserts a check-in and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the day is already open.
    pub fn insert_check_in(&mut self, check_in: &CheckIn) -> Result<i64, PersistenceError> {
        mutations::shifts::insert_check_in(&mut self.conn, check_in)
    }

    /// Inserts a check-out and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the day is already closed, or
    /// `ForeignKeyViolation` if it was never opened.
    pub fn insert_check_out(&mut self, check_out: &CheckOut) -> Result<i64, PersistenceError> {
        mutations::shifts::insert_check_out(&mut self.conn, check_out)
    }

    /// Rewrites a stored check-in.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the check-in does not exist.
    pub fn update_check_in(&mut self, check_in: &CheckIn) -> Result<(), PersistenceError> {
        mutations::shifts::update_check_in(&mut self.conn, check_in)
    }

    /// Rewrites a stored check-out.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the check-out does not exist.
    pub fn update_check_out(&mut self, check_out: &CheckOut) -> Result<(), PersistenceError> {
        mutations::shifts::update_check_out(&mut self.conn, check_out)
    }

    // ========================================================================
    // Assignments
    // ========================================================================

    /// Retrieves the edge between a driver and a supervisor.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is invalid.
    pub fn get_assignment_edge(
        &mut self,
        driver_id: i64,
        supervisor_account_id: i64,
    ) -> Result<Option<AssignmentEdge>, PersistenceError> {
        queries::assignments::get_assignment_edge(&mut self.conn, driver_id, supervisor_account_id)
    }

    /// Lists a supervisor's edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_assignment_edges(
        &mut self,
        supervisor_account_id: i64,
        active_only: bool,
    ) -> Result<Vec<AssignmentEdge>, PersistenceError> {
        queries::assignments::list_assignment_edges(
            &mut self.conn,
            supervisor_account_id,
            active_only,
        )
    }

    /// Returns the drivers actively assigned to a supervisor.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn assigned_driver_ids(
        &mut self,
        supervisor_account_id: i64,
    ) -> Result<BTreeSet<i64>, PersistenceError> {
        queries::assignments::assigned_driver_ids(&mut self.conn, supervisor_account_id)
    }

    /// Inserts an assignment edge and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the pair already has an edge.
    pub fn insert_assignment_edge(
        &mut self,
        edge: &AssignmentEdge,
    ) -> Result<i64, PersistenceError> {
        mutations::assignments::insert_assignment_edge(&mut self.conn, edge)
    }

    /// Writes back an assignment edge.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the edge does not exist.
    pub fn update_assignment_edge(
        &mut self,
        edge: &AssignmentEdge,
    ) -> Result<(), PersistenceError> {
        mutations::assignments::update_assignment_edge(&mut self.conn, edge)
    }

    // ========================================================================
    // Modification Requests
    // ========================================================================

    /// Stores a modification request and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_modification_request(
        &mut self,
        request: &ModificationRequest,
    ) -> Result<i64, PersistenceError> {
        mutations::requests::insert_modification_request(&mut self.conn, request)
    }

    /// Retrieves a modification request.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is invalid.
    pub fn get_modification_request(
        &mut self,
        request_id: i64,
    ) -> Result<Option<ModificationRequest>, PersistenceError> {
        queries::requests::get_modification_request(&mut self.conn, request_id)
    }

    /// Lists modification requests matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_modification_requests(
        &mut self,
        filter: &RequestFilter,
    ) -> Result<Vec<ModificationRequest>, PersistenceError> {
        queries::requests::list_modification_requests(&mut self.conn, filter)
    }

    /// Records a decision on a request that is still pending.
    ///
    /// Returns the number of rows changed; zero means the request was
    /// decided by someone else first.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn record_modification_decision(
        &mut self,
        request_id: i64,
        request: &ModificationRequest,
    ) -> Result<usize, PersistenceError> {
        mutations::requests::record_modification_decision(&mut self.conn, request_id, request)
    }

    // ========================================================================
    // Breakdowns
    // ========================================================================

    /// Files a breakdown report and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_breakdown_report(
        &mut self,
        report: &BreakdownReport,
    ) -> Result<i64, PersistenceError> {
        mutations::breakdowns::insert_breakdown_report(&mut self.conn, report)
    }

    /// Retrieves a breakdown report.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is invalid.
    pub fn get_breakdown_report(
        &mut self,
        report_id: i64,
    ) -> Result<Option<BreakdownReport>, PersistenceError> {
        queries::breakdowns::get_breakdown_report(&mut self.conn, report_id)
    }

    /// Lists breakdown reports matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is invalid.
    pub fn list_breakdown_reports(
        &mut self,
        filter: &BreakdownFilter,
    ) -> Result<Vec<BreakdownReport>, PersistenceError> {
        queries::breakdowns::list_breakdown_reports(&mut self.conn, filter)
    }

    /// Writes back a breakdown report.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the report does not exist.
    pub fn update_breakdown_report(
        &mut self,
        report: &BreakdownReport,
    ) -> Result<(), PersistenceError> {
        mutations::breakdowns::update_breakdown_report(&mut self.conn, report)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Persists an audit event and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails.
    pub fn persist_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not exist or cannot be decoded.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }

    /// Lists audit events oldest first, for one driver or for everything.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or an event cannot be decoded.
    pub fn list_audit_events(
        &mut self,
        driver_id: Option<i64>,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::list_audit_events(&mut self.conn, driver_id)
    }

    // ========================================================================
    // Schema Introspection
    // ========================================================================

    /// Lists the unique column sets declared on `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the introspection query fails.
    pub fn unique_column_sets(
        &mut self,
        table: &str,
    ) -> Result<Vec<Vec<String>>, PersistenceError> {
        backend::sqlite::unique_column_sets(&mut self.conn, table)
    }

    /// Lists the foreign keys declared on `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the introspection query fails.
    pub fn foreign_keys(&mut self, table: &str) -> Result<Vec<ForeignKeyInfo>, PersistenceError> {
        backend::sqlite::foreign_keys(&mut self.conn, table)
    }
}

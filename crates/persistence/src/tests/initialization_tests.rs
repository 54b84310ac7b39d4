// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_test_driver, create_test_persistence};
use crate::{ForeignKeyInfo, Persistence};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, crate::PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_on() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    create_test_driver(&mut db1, "Martin");

    assert_eq!(db1.all_driver_ids().unwrap().len(), 1);
    assert!(db2.all_driver_ids().unwrap().is_empty());
}

#[test]
fn test_shift_tables_are_unique_per_driver_and_date() {
    let mut persistence: Persistence = create_test_persistence();
    let expected: Vec<String> = vec![String::from("driver_id"), String::from("shift_date")];

    for table in ["checkins", "checkouts"] {
        let sets: Vec<Vec<String>> = persistence.unique_column_sets(table).unwrap();
        assert!(sets.contains(&expected), "{table} lacks (driver_id, shift_date)");
    }
}

#[test]
fn test_assignment_edges_are_unique_per_pair() {
    let mut persistence: Persistence = create_test_persistence();
    let sets: Vec<Vec<String>> = persistence.unique_column_sets("assignment_edges").unwrap();
    assert!(sets.contains(&vec![
        String::from("driver_id"),
        String::from("supervisor_account_id")
    ]));
}

#[test]
fn test_driver_owned_tables_cascade() {
    let mut persistence: Persistence = create_test_persistence();

    for table in [
        "checkins",
        "modification_requests",
        "breakdown_reports",
        "assignment_edges",
    ] {
        let keys: Vec<ForeignKeyInfo> = persistence.foreign_keys(table).unwrap();
        let driver_key: &ForeignKeyInfo = keys
            .iter()
            .find(|k| k.column == "driver_id" && k.references == "drivers")
            .unwrap_or_else(|| panic!("{table} has no driver foreign key"));
        assert_eq!(driver_key.on_delete, "CASCADE", "{table}");
    }
}

#[test]
fn test_audit_events_have_no_foreign_keys() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.foreign_keys("audit_events").unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf =
        std::env::temp_dir().join(format!("taxi-ledger-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_driver(&mut persistence, "Martin");
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.all_driver_ids().unwrap().len(), 1);

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

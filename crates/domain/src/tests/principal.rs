// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use crate::{Principal, Role, SUPERVISOR_GROUP, Scope};

fn groups(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|n| (*n).to_string()).collect()
}

#[test]
fn test_super_admin_takes_precedence() {
    let principal: Principal =
        Principal::new(1, true, false, groups(&[SUPERVISOR_GROUP]), Some(3), false);
    assert_eq!(principal.role(), Role::SuperAdmin);
    assert!(principal.role().is_administrator());
}

#[test]
fn test_staff_admin() {
    let principal: Principal = Principal::new(1, false, true, BTreeSet::new(), None, false);
    assert_eq!(principal.role(), Role::StaffAdmin);
    assert!(principal.role().sees_all_drivers());
}

#[test]
fn test_supervisor_group_member() {
    let principal: Principal =
        Principal::new(2, false, false, groups(&[SUPERVISOR_GROUP]), None, false);
    assert_eq!(principal.role(), Role::Supervisor);
    assert!(!principal.role().sees_all_drivers());
    assert!(!principal.role().is_administrator());
}

#[test]
fn test_supervisor_with_staff_flag_is_staff_admin() {
    let principal: Principal =
        Principal::new(2, false, false, groups(&[SUPERVISOR_GROUP]), None, true);
    assert_eq!(principal.role(), Role::StaffAdmin);
}

#[test]
fn test_driver_roles() {
    let driver: Principal = Principal::new(3, false, false, BTreeSet::new(), Some(10), false);
    assert_eq!(driver.role(), Role::Driver);
    assert_eq!(driver.linked_driver_id(), Some(10));

    let elevated: Principal = Principal::new(4, false, false, BTreeSet::new(), Some(11), true);
    assert_eq!(elevated.role(), Role::ElevatedDriver);
    assert!(elevated.role().sees_all_drivers());
    assert!(!elevated.role().is_administrator());
}

#[test]
fn test_unrelated_groups_grant_nothing() {
    let principal: Principal = Principal::new(5, false, false, groups(&["dispatch"]), None, false);
    assert_eq!(principal.role(), Role::Anonymous);
}

#[test]
fn test_scope_containment() {
    let scope: Scope = Scope::Drivers([1, 2].into_iter().collect());
    assert!(scope.contains(1));
    assert!(!scope.contains(3));
    assert_eq!(scope.driver_filter(), Some(vec![1, 2]));

    assert!(Scope::All.contains(999));
    assert!(Scope::All.driver_filter().is_none());
    assert!(Scope::none().is_empty());
    assert!(!Scope::All.is_empty());
}

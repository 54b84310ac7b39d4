// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ConfigError, LedgerConfig};
use taxi_ledger_domain::BusinessClock;

#[test]
fn test_default_config_matches_fleet_defaults() {
    let config: LedgerConfig = LedgerConfig::default();

    assert_eq!(config.day_start_hour, 3);
    assert_eq!(config.timezone, "Europe/Paris");
    let clock: BusinessClock = config.clock().unwrap();
    assert_eq!(clock.timezone_name(), "Europe/Paris");
}

#[test]
fn test_json_fills_missing_keys() {
    let config: LedgerConfig = LedgerConfig::from_json(r#"{"day_start_hour": 4}"#).unwrap();

    assert_eq!(config.day_start_hour, 4);
    assert_eq!(config.timezone, "Europe/Paris");
}

#[test]
fn test_out_of_range_hour_is_rejected() {
    assert!(matches!(
        LedgerConfig::new(24, "Europe/Paris"),
        Err(ConfigError::Invalid(_))
    ));
}

#[test]
fn test_unknown_timezone_is_rejected() {
    assert!(matches!(
        LedgerConfig::from_json(r#"{"timezone": "Mars/Olympus"}"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        LedgerConfig::from_json("not json"),
        Err(ConfigError::Parse(_))
    ));
}

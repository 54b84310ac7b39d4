// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Target-versus-realized performance classification.
//!
//! Classification is a read-time view over a shift pair. It never alters
//! the recorded figures and never clamps the percentage: a driver who
//! doubles the target is reported at 200%.

use serde::{Deserialize, Serialize};

/// Qualitative performance tier for a closed shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// No usable target exists for the shift.
    Unknown,
    /// Below 90% of the target.
    Danger,
    /// Between 90% (inclusive) and 100% (exclusive) of the target.
    Warning,
    /// At or above the target.
    Success,
}

impl Tier {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Danger => "DANGER",
            Self::Warning => "WARNING",
            Self::Success => "SUCCESS",
        }
    }
}

/// Result of classifying a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub tier: Tier,
    /// `realized / target * 100`, absent when the tier is `Unknown`.
    pub percentage: Option<f64>,
    /// A message suitable for showing to the driver as-is.
    pub message: String,
}

/// Classifies realized revenue against the declared target.
///
/// Tier boundaries are evaluated on integers; the floating-point
/// percentage is only reported.
///
/// # Arguments
///
/// * `target` - The declared target, `None` when the check-in is missing
/// * `realized` - The realized revenue
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn classify(target: Option<i64>, realized: i64) -> Reconciliation {
    let Some(target) = target.filter(|t| *t > 0) else {
        return Reconciliation {
            tier: Tier::Unknown,
            percentage: None,
            message: String::from("No target recorded for this shift"),
        };
    };

    let percentage: f64 = realized as f64 / target as f64 * 100.0;
    let tier: Tier = tier_for(i128::from(target), i128::from(realized));

    let message: String = match tier {
        Tier::Success => format!("Target reached, well done ({percentage:.1}%)"),
        Tier::Warning => format!("Almost there: {percentage:.1}% of the target"),
        Tier::Danger => format!("Target missed: {percentage:.1}% of the target"),
        Tier::Unknown => String::from("No target recorded for this shift"),
    };

    Reconciliation {
        tier,
        percentage: Some(percentage),
        message,
    }
}

fn tier_for(target: i128, realized: i128) -> Tier {
    if realized >= target {
        Tier::Success
    } else if realized * 10 >= target * 9 {
        Tier::Warning
    } else {
        Tier::Danger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_monotonic() {
        let target: i64 = 100_000;
        let cases: [(i64, Tier); 6] = [
            (0, Tier::Danger),
            (89_900, Tier::Danger),
            (90_000, Tier::Warning),
            (99_900, Tier::Warning),
            (100_000, Tier::Success),
            (200_000, Tier::Success),
        ];

        let mut previous: Tier = Tier::Unknown;
        for (realized, expected) in cases {
            let result: Reconciliation = classify(Some(target), realized);
            assert_eq!(result.tier, expected, "realized={realized}");
            assert!(result.tier >= previous);
            previous = result.tier;
        }
    }

    #[test]
    fn test_exact_ninety_percent_with_odd_target() {
        assert_eq!(classify(Some(70), 63).tier, Tier::Warning);
        assert_eq!(classify(Some(70), 62).tier, Tier::Danger);
    }

    #[test]
    fn test_percentage_is_not_clamped() {
        let result: Reconciliation = classify(Some(50_000), 70_000);
        assert_eq!(result.tier, Tier::Success);
        let percentage: f64 = result.percentage.unwrap_or_default();
        assert!((percentage - 140.0).abs() < f64::EPSILON);
        assert!(result.message.contains("140.0%"));
    }

    #[test]
    fn test_missing_target_is_unknown() {
        let result: Reconciliation = classify(None, 48_000);
        assert_eq!(result.tier, Tier::Unknown);
        assert!(result.percentage.is_none());
    }

    #[test]
    fn test_non_positive_target_is_unknown() {
        assert_eq!(classify(Some(0), 10).tier, Tier::Unknown);
        assert_eq!(classify(Some(-5), 10).tier, Tier::Unknown);
    }
}

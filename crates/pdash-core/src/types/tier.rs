//! Partner performance tiers.
//!
//! This module provides the five-level tier scale used to bucket partners
//! by monthly earnings:
//!
//! - [`Tier`]: the ordered scale from Platinum down to Inactive
//!
//! Classification is threshold based and evaluated high-to-low; the
//! separate cumulative-zero override (a partner whose earnings sum to zero
//! across every month is Inactive everywhere) is applied by the data store
//! at load time, not here.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Partner performance tier, ordered from best (Platinum) to worst
/// (Inactive).
///
/// The discriminants give the display hierarchy, so sorting tiers (or
/// using them as ordered map keys) yields Platinum first and Inactive
/// last.
///
/// # Examples
///
/// ```
/// use pdash_core::types::Tier;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(Tier::classify(dec!(2500)), Tier::Gold);
/// assert!(Tier::Platinum < Tier::Bronze); // better sorts first
/// assert!(!Tier::Inactive.is_active());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Tier {
    /// Monthly earnings of 5000 or more.
    Platinum = 1,
    /// Monthly earnings of 1000 or more.
    Gold = 2,
    /// Monthly earnings of 100 or more.
    Silver = 3,
    /// Any positive monthly earnings. Also the pre-classification default.
    #[default]
    Bronze = 4,
    /// No earnings (or the cumulative-zero override).
    Inactive = 5,
}

impl Tier {
    /// All tiers in display order, best first.
    pub const ALL: [Tier; 5] = [
        Tier::Platinum,
        Tier::Gold,
        Tier::Silver,
        Tier::Bronze,
        Tier::Inactive,
    ];

    /// Classifies a single month's earnings into a tier.
    ///
    /// Thresholds are inclusive on the lower edge and evaluated
    /// high-to-low; anything at or below zero is Inactive.
    #[must_use]
    pub fn classify(earnings: Decimal) -> Self {
        if earnings >= dec!(5000) {
            Tier::Platinum
        } else if earnings >= dec!(1000) {
            Tier::Gold
        } else if earnings >= dec!(100) {
            Tier::Silver
        } else if earnings > Decimal::ZERO {
            Tier::Bronze
        } else {
            Tier::Inactive
        }
    }

    /// Returns true for every tier except Inactive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Tier::Inactive
    }

    /// Returns the tier label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Platinum => "Platinum",
            Tier::Gold => "Gold",
            Tier::Silver => "Silver",
            Tier::Bronze => "Bronze",
            Tier::Inactive => "Inactive",
        }
    }

    /// Parses a tier label.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Platinum" => Some(Tier::Platinum),
            "Gold" => Some(Tier::Gold),
            "Silver" => Some(Tier::Silver),
            "Bronze" => Some(Tier::Bronze),
            "Inactive" => Some(Tier::Inactive),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        let cases = [
            (dec!(0), Tier::Inactive),
            (dec!(99.99), Tier::Bronze),
            (dec!(100), Tier::Silver),
            (dec!(999.99), Tier::Silver),
            (dec!(1000), Tier::Gold),
            (dec!(4999.99), Tier::Gold),
            (dec!(5000), Tier::Platinum),
        ];
        for (earnings, expected) in cases {
            assert_eq!(Tier::classify(earnings), expected, "earnings {earnings}");
        }
    }

    #[test]
    fn test_classify_negative_is_inactive() {
        assert_eq!(Tier::classify(dec!(-250)), Tier::Inactive);
    }

    #[test]
    fn test_ordering_matches_hierarchy() {
        let mut tiers = vec![Tier::Bronze, Tier::Platinum, Tier::Inactive, Tier::Gold];
        tiers.sort();
        assert_eq!(
            tiers,
            vec![Tier::Platinum, Tier::Gold, Tier::Bronze, Tier::Inactive]
        );
    }

    #[test]
    fn test_label_round_trip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::parse(tier.label()), Some(tier));
        }
        assert_eq!(Tier::parse("platinum"), None); // case sensitive
    }

    #[test]
    fn test_serde_as_label() {
        assert_eq!(
            serde_json::to_string(&Tier::Platinum).unwrap(),
            "\"Platinum\""
        );
    }
}

//! Shared fixtures for gift-tax integration tests.

use chrono::NaiveDate;
use trustflow_core::{Gift, Money, TrustId};

/// Shorthand for building dates.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// A validated gift of whole dollars.
pub fn gift(trust: TrustId, donor: &str, dollars: i64, on: NaiveDate) -> Gift {
    Gift::new(trust, donor, Money::from_dollars(dollars), on).expect("fixture gift is valid")
}

/// Two trusts and a mixed gift history spanning 2024 and 2025.
pub struct GiftHistory {
    /// The Johnson family ILIT
    pub johnson_trust: TrustId,
    /// The Lee family ILIT
    pub lee_trust: TrustId,
    /// Recorded gifts, in entry order
    pub gifts: Vec<Gift>,
}

impl GiftHistory {
    /// Builds the history.
    pub fn new() -> Self {
        let johnson_trust = TrustId::new();
        let lee_trust = TrustId::new();
        let gifts = vec![
            gift(johnson_trust, "Mark Johnson", 10_000, date(2025, 1, 10))
                .with_donor_email("mark@example.com"),
            gift(lee_trust, "Sarah Lee", 12_000, date(2025, 3, 3)),
            gift(johnson_trust, "Mark Johnson", 10_000, date(2025, 4, 10)),
            gift(johnson_trust, "Mark Johnson", 10_000, date(2025, 9, 10)),
            gift(johnson_trust, "Mark Johnson", 18_000, date(2024, 12, 31)),
            gift(lee_trust, "Mark Johnson", 5_000, date(2025, 6, 1)),
        ];
        Self {
            johnson_trust,
            lee_trust,
            gifts,
        }
    }
}

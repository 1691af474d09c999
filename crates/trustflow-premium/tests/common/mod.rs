//! Shared fixtures for premium integration tests.

use chrono::NaiveDate;
use trustflow_core::{Gift, InsurancePolicy, Money, PremiumFrequency, PremiumPayment, TrustId};

/// Shorthand for building dates.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// The Johnson ILIT: two policies, a year of gifts and payments.
pub struct JohnsonTrust {
    /// The trust
    pub trust_id: TrustId,
    /// Survivorship policy billed quarterly
    pub survivorship: InsurancePolicy,
    /// Term policy billed annually
    pub term: InsurancePolicy,
    /// Gifts received
    pub gifts: Vec<Gift>,
    /// Premiums paid, in entry order
    pub payments: Vec<PremiumPayment>,
}

impl JohnsonTrust {
    /// Builds the trust as of mid-2025.
    pub fn new() -> Self {
        let trust_id = TrustId::new();
        let survivorship = InsurancePolicy::new(trust_id, "NYL-2231", Money::from_dollars(24_000))
            .with_frequency(PremiumFrequency::Quarterly)
            .with_next_due(date(2025, 7, 1));
        let term = InsurancePolicy::new(trust_id, "PRU-884", Money::from_dollars(3_600))
            .with_next_due(date(2025, 11, 15));

        let gift = |dollars, on| {
            Gift::new(trust_id, "Mark Johnson", Money::from_dollars(dollars), on)
                .expect("fixture gift is valid")
        };
        let gifts = vec![
            gift(10_000, date(2025, 1, 10)),
            gift(10_000, date(2025, 4, 10)),
            gift(15_000, date(2025, 6, 1)),
        ];

        let paid = |policy: &InsurancePolicy, dollars, on| {
            PremiumPayment::new(policy.id, Money::from_dollars(dollars), on)
                .expect("fixture payment is valid")
        };
        let payments = vec![
            paid(&survivorship, 6_000, date(2025, 1, 2)).with_method("wire"),
            paid(&term, 3_600, date(2024, 11, 15)).with_method("check"),
            paid(&survivorship, 6_000, date(2025, 4, 1)).with_method("wire"),
        ];

        Self {
            trust_id,
            survivorship,
            term,
            gifts,
            payments,
        }
    }

    /// Both policies.
    pub fn policies(&self) -> Vec<InsurancePolicy> {
        vec![self.survivorship.clone(), self.term.clone()]
    }
}

//! Shared fixtures for Crummey integration tests.

use chrono::NaiveDate;
use trustflow_core::{Beneficiary, Gift, Money, Percentage, TrustId};

/// A trust with two beneficiaries splitting gifts 60/40.
pub struct TrustFixture {
    /// Trust under test
    pub trust_id: TrustId,
    /// Beneficiary "A", 60%
    pub alice: Beneficiary,
    /// Beneficiary "B", 40%
    pub bob: Beneficiary,
}

impl TrustFixture {
    /// Builds the 60/40 trust.
    pub fn sixty_forty() -> Self {
        let trust_id = TrustId::new();
        Self {
            trust_id,
            alice: Beneficiary::new(trust_id, "Alice Johnson", Percentage::whole(60).unwrap())
                .with_email("alice@example.com"),
            bob: Beneficiary::new(trust_id, "Bob Johnson", Percentage::whole(40).unwrap()),
        }
    }

    /// Current beneficiary snapshot.
    pub fn beneficiaries(&self) -> Vec<Beneficiary> {
        vec![self.alice.clone(), self.bob.clone()]
    }

    /// A gift from Mark Johnson to this trust.
    pub fn gift(&self, dollars: i64, on: NaiveDate) -> Gift {
        Gift::new(self.trust_id, "Mark Johnson", Money::from_dollars(dollars), on)
            .expect("fixture gift is valid")
    }
}

/// Shorthand for building dates.
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

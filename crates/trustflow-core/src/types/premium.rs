//! Life insurance policies held by a trust and the premiums paid on them.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{GiftId, Money, PaymentId, PolicyId, TrustId};

/// How often a policy's premium falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PremiumFrequency {
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    SemiAnnual,
    /// Once a year.
    #[default]
    Annual,
}

impl PremiumFrequency {
    /// Months between two due dates.
    pub fn months(self) -> u32 {
        match self {
            PremiumFrequency::Monthly => 1,
            PremiumFrequency::Quarterly => 3,
            PremiumFrequency::SemiAnnual => 6,
            PremiumFrequency::Annual => 12,
        }
    }

    /// The due date one period after `from`.
    ///
    /// A day past the end of the target month is clamped to its last day, so
    /// January 31 advanced monthly lands on February 28 (or 29).
    pub fn advance(self, from: NaiveDate) -> Result<NaiveDate> {
        let months = self.months();
        from.checked_add_months(Months::new(months)).ok_or_else(|| {
            Error::validation_field(
                "next_premium_due",
                format!("{from} plus {months} month(s) is outside the calendar"),
            )
        })
    }
}

/// A life insurance policy owned by a trust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Unique identifier
    pub id: PolicyId,

    /// Trust owning the policy
    pub trust_id: TrustId,

    /// Carrier's policy number
    pub policy_number: String,

    /// Premium billed per year
    pub annual_premium: Money,

    /// Billing schedule
    #[serde(default)]
    pub premium_frequency: PremiumFrequency,

    /// Next date a premium is owed, if scheduled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_premium_due: Option<NaiveDate>,
}

impl InsurancePolicy {
    /// Creates an annually billed policy with a fresh id and no due date.
    pub fn new(trust_id: TrustId, policy_number: impl Into<String>, annual_premium: Money) -> Self {
        Self {
            id: PolicyId::new(),
            trust_id,
            policy_number: policy_number.into(),
            annual_premium,
            premium_frequency: PremiumFrequency::default(),
            next_premium_due: None,
        }
    }

    /// Sets the billing schedule.
    pub fn with_frequency(mut self, frequency: PremiumFrequency) -> Self {
        self.premium_frequency = frequency;
        self
    }

    /// Sets the next due date.
    pub fn with_next_due(mut self, due: NaiveDate) -> Self {
        self.next_premium_due = Some(due);
        self
    }

    /// Checks the record's shape.
    pub fn validate(&self) -> Result<()> {
        if self.annual_premium.is_negative() {
            return Err(Error::validation_field(
                "annual_premium",
                format!(
                    "annual premium must not be negative (got {})",
                    self.annual_premium
                ),
            ));
        }
        Ok(())
    }

    /// Returns `true` if the next premium falls within `[from, to]`.
    pub fn is_due_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.next_premium_due.is_some_and(|due| from <= due && due <= to)
    }
}

/// Settlement state of a premium payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Funds have left the trust.
    #[default]
    Completed,
    /// Initiated but not yet settled.
    Pending,
    /// Rejected by the carrier or the bank.
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentStatus::Completed => "completed",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A premium paid from trust funds on one policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPayment {
    /// Unique identifier
    pub id: PaymentId,

    /// Policy the premium was paid on
    pub policy_id: PolicyId,

    /// Amount paid
    pub amount: Money,

    /// Date the payment was made
    pub payment_date: NaiveDate,

    /// Wire, check, ACH and so on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,

    /// Settlement state
    #[serde(default)]
    pub status: PaymentStatus,

    /// Gift whose funds paid this premium, if tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gift_id: Option<GiftId>,

    /// Carrier or bank confirmation number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_number: Option<String>,

    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PremiumPayment {
    /// Creates a validated, completed payment with a fresh id.
    pub fn new(policy_id: PolicyId, amount: Money, payment_date: NaiveDate) -> Result<Self> {
        let payment = Self {
            id: PaymentId::new(),
            policy_id,
            amount,
            payment_date,
            payment_method: None,
            status: PaymentStatus::default(),
            gift_id: None,
            confirmation_number: None,
            notes: None,
        };
        payment.validate()?;
        Ok(payment)
    }

    /// Sets the payment method.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the record's shape.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(Error::validation_field(
                "amount",
                format!("payment amount must be positive (got {})", self.amount),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_advance() {
        let from = date(2025, 3, 15);
        assert_eq!(PremiumFrequency::Monthly.advance(from).unwrap(), date(2025, 4, 15));
        assert_eq!(PremiumFrequency::Quarterly.advance(from).unwrap(), date(2025, 6, 15));
        assert_eq!(PremiumFrequency::SemiAnnual.advance(from).unwrap(), date(2025, 9, 15));
        assert_eq!(PremiumFrequency::Annual.advance(from).unwrap(), date(2026, 3, 15));
    }

    #[test]
    fn test_frequency_advance_clamps_month_end() {
        assert_eq!(
            PremiumFrequency::Monthly.advance(date(2025, 1, 31)).unwrap(),
            date(2025, 2, 28)
        );
        assert_eq!(
            PremiumFrequency::Annual.advance(date(2024, 2, 29)).unwrap(),
            date(2025, 2, 28)
        );
    }

    #[test]
    fn test_frequency_advance_past_calendar_is_error() {
        assert!(PremiumFrequency::Annual.advance(NaiveDate::MAX).is_err());
    }

    #[test]
    fn test_frequency_serialization() {
        let json = serde_json::to_string(&PremiumFrequency::SemiAnnual).unwrap();
        assert_eq!(json, "\"semi-annual\"");
        let back: PremiumFrequency = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(back, PremiumFrequency::Quarterly);
    }

    #[test]
    fn test_policy_due_window_is_inclusive() {
        let policy = InsurancePolicy::new(TrustId::new(), "P-100", Money::from_dollars(12_000))
            .with_next_due(date(2025, 9, 1));
        assert!(policy.is_due_between(date(2025, 9, 1), date(2025, 9, 1)));
        assert!(policy.is_due_between(date(2025, 6, 1), date(2025, 9, 1)));
        assert!(!policy.is_due_between(date(2025, 9, 2), date(2025, 12, 1)));

        let unscheduled = InsurancePolicy::new(TrustId::new(), "P-101", Money::ZERO);
        assert!(!unscheduled.is_due_between(NaiveDate::MIN, NaiveDate::MAX));
    }

    #[test]
    fn test_policy_rejects_negative_premium() {
        let policy = InsurancePolicy::new(TrustId::new(), "P-100", Money::from_dollars(-1));
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_payment_rejects_non_positive_amount() {
        let err = PremiumPayment::new(PolicyId::new(), Money::ZERO, date(2025, 1, 1)).unwrap_err();
        let Error::Validation { field, .. } = err else {
            unreachable!("Expected Validation error");
        };
        assert_eq!(field.as_deref(), Some("amount"));
    }

    #[test]
    fn test_payment_deserialize_defaults() {
        let json = format!(
            r#"{{"id":"{}","policy_id":"{}","amount":"4500.00","payment_date":"2025-02-01"}}"#,
            PaymentId::new(),
            PolicyId::new()
        );
        let payment: PremiumPayment = serde_json::from_str(&json).unwrap();
        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(payment.amount, Money::from_dollars(4_500));
        assert!(payment.payment_method.is_none());
    }
}

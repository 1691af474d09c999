//! Recording a premium payment against its policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trustflow_core::{InsurancePolicy, PremiumPayment};

use crate::error::{Error, Result};

/// A payment accepted by [`record_payment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedPayment {
    /// The payment as recorded
    pub payment: PremiumPayment,
    /// Policy due date before the payment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_due: Option<NaiveDate>,
    /// Policy due date after the payment
    pub next_premium_due: NaiveDate,
}

/// Accepts `payment` on `policy` and advances the policy's next due date by
/// one billing period.
///
/// The period is counted from the current due date, or from `today` when
/// the policy has none. Fails, leaving `policy` untouched, when the payment
/// is malformed, belongs to another policy, or is dated after `today`.
pub fn record_payment(
    policy: &mut InsurancePolicy,
    payment: PremiumPayment,
    today: NaiveDate,
) -> Result<RecordedPayment> {
    payment.validate()?;
    policy.validate()?;
    if payment.policy_id != policy.id {
        return Err(Error::validation_field(
            "policy_id",
            format!(
                "payment {} is for policy {}, not {}",
                payment.id, payment.policy_id, policy.id
            ),
        ));
    }
    if payment.payment_date > today {
        return Err(Error::validation_field(
            "payment_date",
            format!(
                "payment date {} cannot be in the future (today is {today})",
                payment.payment_date
            ),
        ));
    }

    let previous_due = policy.next_premium_due;
    let next_premium_due = policy
        .premium_frequency
        .advance(previous_due.unwrap_or(today))?;
    policy.next_premium_due = Some(next_premium_due);

    log::info!(
        "Recorded {} on policy {}; next premium due {next_premium_due}",
        payment.amount,
        policy.policy_number
    );
    Ok(RecordedPayment {
        payment,
        previous_due,
        next_premium_due,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use trustflow_core::{Money, PolicyId, PremiumFrequency, TrustId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quarterly_policy() -> InsurancePolicy {
        InsurancePolicy::new(TrustId::new(), "NYL-2231", Money::from_dollars(12_000))
            .with_frequency(PremiumFrequency::Quarterly)
            .with_next_due(date(2025, 4, 1))
    }

    #[test]
    fn test_record_advances_due_date() {
        let mut policy = quarterly_policy();
        let payment =
            PremiumPayment::new(policy.id, Money::from_dollars(3_000), date(2025, 3, 28)).unwrap();

        let recorded = record_payment(&mut policy, payment.clone(), date(2025, 3, 30)).unwrap();
        assert_eq!(recorded.payment, payment);
        assert_eq!(recorded.previous_due, Some(date(2025, 4, 1)));
        assert_eq!(recorded.next_premium_due, date(2025, 7, 1));
        assert_eq!(policy.next_premium_due, Some(date(2025, 7, 1)));
    }

    #[test]
    fn test_record_without_due_date_counts_from_today() {
        let mut policy = InsurancePolicy::new(TrustId::new(), "P-9", Money::from_dollars(1_200));
        let payment =
            PremiumPayment::new(policy.id, Money::from_dollars(1_200), date(2025, 5, 1)).unwrap();
        let recorded = record_payment(&mut policy, payment, date(2025, 5, 2)).unwrap();
        assert_eq!(recorded.previous_due, None);
        assert_eq!(recorded.next_premium_due, date(2026, 5, 2));
    }

    #[test]
    fn test_payment_on_today_is_accepted() {
        let mut policy = quarterly_policy();
        let today = date(2025, 3, 30);
        let payment = PremiumPayment::new(policy.id, Money::from_dollars(10), today).unwrap();
        assert!(record_payment(&mut policy, payment, today).is_ok());
    }

    #[test]
    fn test_future_payment_rejected() {
        let mut policy = quarterly_policy();
        let before = policy.clone();
        let payment =
            PremiumPayment::new(policy.id, Money::from_dollars(3_000), date(2025, 4, 2)).unwrap();
        let err = record_payment(&mut policy, payment, date(2025, 4, 1)).unwrap_err();
        assert!(err.to_string().contains("cannot be in the future"));
        assert_eq!(policy, before);
    }

    #[test]
    fn test_payment_for_other_policy_rejected() {
        let mut policy = quarterly_policy();
        let payment =
            PremiumPayment::new(PolicyId::new(), Money::from_dollars(3_000), date(2025, 3, 1))
                .unwrap();
        let err = record_payment(&mut policy, payment, date(2025, 3, 2)).unwrap_err();
        assert!(matches!(
            err,
            Error::Core(trustflow_core::Error::Validation { ref field, .. })
                if field.as_deref() == Some("policy_id")
        ));
        assert_eq!(policy.next_premium_due, Some(date(2025, 4, 1)));
    }
}

//! Premium payment history.
//!
//! [`summarize_payments`] joins each payment to its policy, keeps the ones a
//! [`PaymentFilter`] accepts, and reports them newest first with their total,
//! count and average. Payments whose policy is not in the snapshot have
//! nothing to join to and are left out with a warning.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trustflow_core::{
    InsurancePolicy, Money, PaymentId, PaymentStatus, PolicyId, PremiumPayment, TrustId,
};

use crate::error::{Error, Result};

/// Restricts which payments a summary covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFilter {
    /// Earliest payment date, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// Latest payment date, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,

    /// Only payments on policies owned by this trust
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_id: Option<TrustId>,

    /// Only payments on this policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<PolicyId>,
}

impl PaymentFilter {
    /// Filter covering `[start, end]`.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Self::default()
        }
    }

    /// Restricts to one trust.
    pub fn with_trust(mut self, trust_id: TrustId) -> Self {
        self.trust_id = Some(trust_id);
        self
    }

    /// Restricts to one policy.
    pub fn with_policy(mut self, policy_id: PolicyId) -> Self {
        self.policy_id = Some(policy_id);
        self
    }

    /// Rejects a range that ends before it starts.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (self.start, self.end)
            && end < start
        {
            return Err(Error::validation_field(
                "end",
                format!("date range ends ({end}) before it starts ({start})"),
            ));
        }
        Ok(())
    }

    /// Returns `true` if `payment` on `policy` passes every criterion.
    pub fn matches(&self, payment: &PremiumPayment, policy: &InsurancePolicy) -> bool {
        self.start.is_none_or(|start| payment.payment_date >= start)
            && self.end.is_none_or(|end| payment.payment_date <= end)
            && self.trust_id.is_none_or(|id| policy.trust_id == id)
            && self.policy_id.is_none_or(|id| payment.policy_id == id)
    }
}

/// One payment joined with its policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment identifier
    pub payment_id: PaymentId,
    /// Date paid
    pub payment_date: NaiveDate,
    /// Policy paid on
    pub policy_id: PolicyId,
    /// Carrier's policy number
    pub policy_number: String,
    /// Trust owning the policy
    pub trust_id: TrustId,
    /// Amount paid
    pub amount: Money,
    /// How it was paid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    /// Settlement state
    pub status: PaymentStatus,
    /// Free-form notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PaymentRecord {
    fn join(payment: &PremiumPayment, policy: &InsurancePolicy) -> Self {
        Self {
            payment_id: payment.id,
            payment_date: payment.payment_date,
            policy_id: policy.id,
            policy_number: policy.policy_number.clone(),
            trust_id: policy.trust_id,
            amount: payment.amount,
            payment_method: payment.payment_method.clone(),
            status: payment.status,
            notes: payment.notes.clone(),
        }
    }
}

/// Result of [`summarize_payments`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumPaymentSummary {
    /// Filter the summary was built with
    pub filter: PaymentFilter,
    /// Sum of all listed payments
    pub total_amount: Money,
    /// Number of listed payments
    pub payment_count: usize,
    /// `total_amount / payment_count` to the cent, zero when empty
    pub average_payment: Money,
    /// Matching payments, newest first
    pub payments: Vec<PaymentRecord>,
}

impl PremiumPaymentSummary {
    /// Returns `true` when no payment matched the filter.
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}

/// Summarizes `payments` on `policies` matching `filter`.
///
/// Every payment and policy is validated first. Payments sharing a date are
/// ordered by id so the output does not depend on input order.
pub fn summarize_payments(
    payments: &[PremiumPayment],
    policies: &[InsurancePolicy],
    filter: &PaymentFilter,
) -> Result<PremiumPaymentSummary> {
    filter.validate()?;
    let by_id = index_policies(policies)?;
    for payment in payments {
        payment.validate()?;
    }

    let mut records: Vec<PaymentRecord> = payments
        .iter()
        .filter_map(|payment| match by_id.get(&payment.policy_id) {
            Some(policy) => Some((payment, *policy)),
            None => {
                log::warn!(
                    "Payment {} references policy {} which is not in the snapshot; skipping",
                    payment.id,
                    payment.policy_id
                );
                None
            }
        })
        .filter(|(payment, policy)| filter.matches(payment, policy))
        .map(|(payment, policy)| PaymentRecord::join(payment, policy))
        .collect();
    records.sort_by(|a, b| {
        b.payment_date
            .cmp(&a.payment_date)
            .then_with(|| a.payment_id.cmp(&b.payment_id))
    });

    let total_amount = Money::checked_sum(records.iter().map(|r| r.amount))?;
    let payment_count = records.len();
    let average_payment = average(total_amount, payment_count);

    log::info!("Summarized {payment_count} premium payment(s) totaling {total_amount}");
    Ok(PremiumPaymentSummary {
        filter: filter.clone(),
        total_amount,
        payment_count,
        average_payment,
        payments: records,
    })
}

/// Maps policy ids to policies, rejecting duplicates and malformed records.
pub(crate) fn index_policies(
    policies: &[InsurancePolicy],
) -> Result<HashMap<PolicyId, &InsurancePolicy>> {
    let mut by_id = HashMap::with_capacity(policies.len());
    for policy in policies {
        policy.validate()?;
        if by_id.insert(policy.id, policy).is_some() {
            return Err(Error::validation_field(
                "policy_id",
                format!("policy {} appears more than once", policy.id),
            ));
        }
    }
    Ok(by_id)
}

fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::ZERO;
    }
    Money::new(total.amount() / Decimal::from(count)).round_to_cents()
}

// ============================================================================
// Tests
// ============================================================================

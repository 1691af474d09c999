//! Whether a trust holds enough to pay its upcoming premiums.
//!
//! Available funds are every gift the trust has received minus every premium
//! it has paid (failed payments excluded). Required funds are the annual
//! premiums of the trust's policies whose next due date falls within
//! `[today, today + lookahead_days]`.

use std::collections::HashSet;
use std::fmt;

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use trustflow_core::{
    Gift, InsurancePolicy, Money, PaymentStatus, PolicyId, PremiumPayment, TrustId,
};

use crate::error::{Error, Result};
use crate::payments::index_policies;

/// Default look-ahead window for upcoming premiums.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 90;

/// Decimal places kept on the coverage ratio.
const RATIO_SCALE: u32 = 4;

/// Outcome of [`check_funds_sufficiency`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SufficiencyCheck {
    /// Trust examined
    pub trust_id: TrustId,
    /// Day the window starts
    pub checked_on: NaiveDate,
    /// Window length in days
    pub lookahead_days: u32,
    /// Last day of the window
    pub window_end: NaiveDate,
    /// All gifts received by the trust
    pub total_gifts: Money,
    /// All premiums paid from the trust
    pub total_paid: Money,
    /// `total_gifts - total_paid`
    pub available_funds: Money,
    /// Annual premiums falling due in the window
    pub required_funds: Money,
    /// Policies whose premium falls due in the window
    pub upcoming_policies: Vec<PolicyId>,
    /// `available_funds >= required_funds`
    pub is_sufficient: bool,
    /// How much is missing, zero when sufficient
    pub shortfall: Money,
    /// `available_funds / required_funds`, absent when nothing is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sufficiency_ratio: Option<Decimal>,
    /// Whole months of premiums the funds cover, absent when nothing is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_of_coverage: Option<Decimal>,
}

impl SufficiencyCheck {
    /// One-line outcome for notifications.
    pub fn message(&self) -> String {
        if self.is_sufficient {
            "Sufficient funds available for upcoming premiums".to_string()
        } else {
            format!("Shortfall of {} for upcoming premiums", self.shortfall)
        }
    }
}

impl fmt::Display for SufficiencyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Checks whether `trust_id` can cover the premiums due in the next
/// `lookahead_days` days.
///
/// Only records belonging to the trust are counted; every record passed in
/// is still validated. Fails when the window is empty or runs past the
/// calendar, or when a sum cannot be represented.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trustflow_core::{Gift, InsurancePolicy, Money, TrustId};
/// use trustflow_premium::check_funds_sufficiency;
///
/// let trust = TrustId::new();
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let gifts = [Gift::new(trust, "Mark Johnson", Money::from_dollars(9_000), today).unwrap()];
/// let policy = InsurancePolicy::new(trust, "NYL-2231", Money::from_dollars(12_000))
///     .with_next_due(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
///
/// let check = check_funds_sufficiency(trust, &gifts, &[policy], &[], today, 90).unwrap();
/// assert!(!check.is_sufficient);
/// assert_eq!(check.shortfall, Money::from_dollars(3_000));
/// assert_eq!(check.to_string(), "Shortfall of 3000.00 for upcoming premiums");
/// ```
pub fn check_funds_sufficiency(
    trust_id: TrustId,
    gifts: &[Gift],
    policies: &[InsurancePolicy],
    payments: &[PremiumPayment],
    today: NaiveDate,
    lookahead_days: u32,
) -> Result<SufficiencyCheck> {
    if lookahead_days == 0 {
        return Err(Error::validation_field(
            "lookahead_days",
            "look-ahead window must be at least one day",
        ));
    }
    let window_end = today
        .checked_add_days(Days::new(u64::from(lookahead_days)))
        .ok_or_else(|| {
            Error::validation_field(
                "lookahead_days",
                format!("{lookahead_days} days after {today} is outside the calendar"),
            )
        })?;

    for gift in gifts {
        gift.validate()?;
    }
    for payment in payments {
        payment.validate()?;
    }
    let by_id = index_policies(policies)?;

    let owned: HashSet<PolicyId> = by_id
        .values()
        .filter(|p| p.trust_id == trust_id)
        .map(|p| p.id)
        .collect();

    let total_gifts = Money::checked_sum(
        gifts
            .iter()
            .filter(|g| g.trust_id == trust_id)
            .map(|g| g.amount),
    )?;
    let total_paid = Money::checked_sum(
        payments
            .iter()
            .filter(|p| owned.contains(&p.policy_id) && p.status != PaymentStatus::Failed)
            .map(|p| p.amount),
    )?;
    let available_funds = total_gifts.checked_sub(total_paid)?;

    let mut upcoming: Vec<&InsurancePolicy> = policies
        .iter()
        .filter(|p| p.trust_id == trust_id && p.is_due_between(today, window_end))
        .collect();
    upcoming.sort_by_key(|p| (p.next_premium_due, p.id));
    let required_funds = Money::checked_sum(upcoming.iter().map(|p| p.annual_premium))?;

    let is_sufficient = available_funds >= required_funds;
    let shortfall = if is_sufficient {
        Money::ZERO
    } else {
        required_funds.checked_sub(available_funds)?
    };

    let (sufficiency_ratio, months_of_coverage) = coverage(available_funds, required_funds)?;

    let check = SufficiencyCheck {
        trust_id,
        checked_on: today,
        lookahead_days,
        window_end,
        total_gifts,
        total_paid,
        available_funds,
        required_funds,
        upcoming_policies: upcoming.iter().map(|p| p.id).collect(),
        is_sufficient,
        shortfall,
        sufficiency_ratio,
        months_of_coverage,
    };
    if check.is_sufficient {
        log::info!("Trust {trust_id}: {check}");
    } else {
        log::warn!("Trust {trust_id}: {check}");
    }
    Ok(check)
}

fn coverage(available: Money, required: Money) -> Result<(Option<Decimal>, Option<Decimal>)> {
    if !required.is_positive() {
        return Ok((None, None));
    }
    let out_of_range = || Error::validation_field("amount", "coverage is out of range");
    let ratio = available
        .amount()
        .checked_div(required.amount())
        .ok_or_else(out_of_range)?
        .round_dp_with_strategy(RATIO_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // Scale before dividing so whole-month answers stay exact.
    let months = available
        .amount()
        .checked_mul(Decimal::from(12))
        .and_then(|scaled| scaled.checked_div(required.amount()))
        .ok_or_else(out_of_range)?
        .floor();
    Ok((Some(ratio), Some(months)))
}

// ============================================================================
// Tests
// ============================================================================

//! Gift allocation into Crummey withdrawal rights.
//!
//! [`allocate`] turns one recorded gift and a snapshot of the trust's
//! beneficiaries into one pending [`WithdrawalNotice`] per beneficiary. It
//! performs no I/O; persisting the notices is the caller's job.
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trustflow_core::{Beneficiary, Gift, Money, Percentage, TrustId};
//! use trustflow_crummey::allocate;
//!
//! let trust = TrustId::new();
//! let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let gift = Gift::new(trust, "Mark Johnson", Money::from_dollars(36_000), date).unwrap();
//! let beneficiaries = vec![
//!     Beneficiary::new(trust, "A", Percentage::whole(60).unwrap()),
//!     Beneficiary::new(trust, "B", Percentage::whole(40).unwrap()),
//! ];
//!
//! let allocation = allocate(&gift, &beneficiaries, 30).unwrap();
//! assert_eq!(allocation.notices.len(), 2);
//! assert_eq!(allocation.notices[0].withdrawal_amount, Money::from_dollars(21_600));
//! assert!(allocation.warnings.is_empty());
//! ```

use std::collections::HashSet;

use chrono::Days;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trustflow_core::{
    Beneficiary, Error, Gift, Money, NoticeStatus, Result, TrustId, WithdrawalNotice,
};

/// Lapse period used when a trust does not configure its own.
pub const DEFAULT_LAPSE_PERIOD_DAYS: u32 = 30;

// ============================================================================
// Percentage invariant
// ============================================================================

/// Outcome of summing a trust's withdrawal percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PercentageCheck {
    /// There are no beneficiaries.
    Empty,
    /// Percentages total exactly 100.
    Balanced,
    /// Percentages total something other than 100.
    Mismatch {
        /// Actual sum of the percentages
        total: Decimal,
    },
}

impl PercentageCheck {
    /// Returns `true` when the set is non-empty and totals 100.
    pub fn is_balanced(&self) -> bool {
        matches!(self, PercentageCheck::Balanced)
    }
}

/// Sums the withdrawal percentages of `beneficiaries`.
///
/// This is the one place the "shares total 100" invariant is evaluated; both
/// the edit-time gate and [`allocate`] go through it.
pub fn check_percentage_total(beneficiaries: &[Beneficiary]) -> PercentageCheck {
    if beneficiaries.is_empty() {
        return PercentageCheck::Empty;
    }
    let total: Decimal = beneficiaries
        .iter()
        .map(|b| b.withdrawal_percentage.value())
        .sum();
    if total == Decimal::ONE_HUNDRED {
        PercentageCheck::Balanced
    } else {
        PercentageCheck::Mismatch { total }
    }
}

/// Edit-time validation of a trust's complete beneficiary list.
///
/// Rejects empty sets, blank names, duplicate ids, beneficiaries from more
/// than one trust, and shares that do not total exactly 100.
pub fn validate_beneficiary_set(beneficiaries: &[Beneficiary]) -> Result<()> {
    let Some(first) = beneficiaries.first() else {
        return Err(Error::validation_field(
            "beneficiaries",
            "a trust needs at least one beneficiary",
        ));
    };

    if let Some(blank) = beneficiaries.iter().find(|b| b.name.trim().is_empty()) {
        return Err(Error::validation_field(
            "name",
            format!("beneficiary {} has no name", blank.id),
        ));
    }
    ensure_single_trust(beneficiaries, first.trust_id)?;
    ensure_unique_ids(beneficiaries)?;

    match check_percentage_total(beneficiaries) {
        PercentageCheck::Balanced => Ok(()),
        PercentageCheck::Mismatch { total } => Err(Error::validation_field(
            "withdrawal_percentage",
            format!("total withdrawal percentage must equal 100 (got {total})"),
        )),
        PercentageCheck::Empty => Err(Error::validation_field(
            "beneficiaries",
            "a trust needs at least one beneficiary",
        )),
    }
}

fn ensure_single_trust(beneficiaries: &[Beneficiary], trust_id: TrustId) -> Result<()> {
    match beneficiaries.iter().find(|b| b.trust_id != trust_id) {
        Some(stray) => Err(Error::validation_field(
            "trust_id",
            format!(
                "beneficiary {} belongs to trust {}, expected {trust_id}",
                stray.id, stray.trust_id
            ),
        )),
        None => Ok(()),
    }
}

fn ensure_unique_ids(beneficiaries: &[Beneficiary]) -> Result<()> {
    let mut seen = HashSet::with_capacity(beneficiaries.len());
    for b in beneficiaries {
        if !seen.insert(b.id) {
            return Err(Error::validation_field(
                "id",
                format!("beneficiary {} appears more than once", b.id),
            ));
        }
    }
    Ok(())
}

// ============================================================================
// Allocation
// ============================================================================

/// Non-fatal condition surfaced by [`allocate`].
///
/// The gift is still recorded; the warning exists so the discrepancy is
/// visible to whoever reviews the allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// The trust has no beneficiaries, so no notices were produced.
    NoBeneficiaries,
    /// Shares did not total 100; each was applied as-is without re-normalizing.
    PercentageMismatch {
        /// Actual sum of the percentages
        total: Decimal,
    },
}

impl std::fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationWarning::NoBeneficiaries => {
                write!(f, "trust has no beneficiaries; no notices generated")
            }
            AllocationWarning::PercentageMismatch { total } => write!(
                f,
                "withdrawal percentages total {}%, not 100%",
                total.normalize()
            ),
        }
    }
}

/// Result of allocating one gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// One pending notice per beneficiary with a non-zero share
    pub notices: Vec<WithdrawalNotice>,

    /// Conditions the caller should surface
    pub warnings: Vec<AllocationWarning>,
}

impl Allocation {
    /// Sum of all withdrawal amounts.
    pub fn total_withdrawable(&self) -> Result<Money> {
        Money::checked_sum(self.notices.iter().map(|n| n.withdrawal_amount))
    }
}

/// Computes the withdrawal rights created by `gift`.
///
/// Each beneficiary gets `round(amount × percentage / 100, 2)` with a deadline
/// `lapse_period_days` calendar days after the gift date. Beneficiaries with a
/// 0% share receive no notice. Notices come back in the order the
/// beneficiaries were given.
///
/// Fails with a validation error when the gift is malformed, when a
/// beneficiary belongs to a different trust, when a beneficiary id repeats,
/// when the deadline falls outside the supported calendar, or when a share
/// of the amount cannot be represented.
pub fn allocate(
    gift: &Gift,
    beneficiaries: &[Beneficiary],
    lapse_period_days: u32,
) -> Result<Allocation> {
    gift.validate()?;
    let withdrawal_deadline = gift
        .date
        .checked_add_days(Days::new(u64::from(lapse_period_days)))
        .ok_or_else(|| {
            Error::validation_field(
                "lapse_period_days",
                format!(
                    "{lapse_period_days} days after {} is outside the calendar",
                    gift.date
                ),
            )
        })?;
    ensure_single_trust(beneficiaries, gift.trust_id)?;
    ensure_unique_ids(beneficiaries)?;

    let mut warnings = Vec::new();
    match check_percentage_total(beneficiaries) {
        PercentageCheck::Balanced => {}
        PercentageCheck::Empty => {
            log::warn!(
                "Gift {} to trust {} has no beneficiaries; no notices generated",
                gift.id,
                gift.trust_id
            );
            warnings.push(AllocationWarning::NoBeneficiaries);
        }
        PercentageCheck::Mismatch { total } => {
            log::warn!(
                "Beneficiary shares for trust {} total {total}%, allocating gift {} without re-normalizing",
                gift.trust_id,
                gift.id
            );
            warnings.push(AllocationWarning::PercentageMismatch { total });
        }
    }

    let notices = beneficiaries
        .iter()
        .filter(|b| {
            if b.withdrawal_percentage.is_zero() {
                log::debug!("Beneficiary {} has a 0% share; skipping", b.id);
                false
            } else {
                true
            }
        })
        .map(|b| {
            Ok(WithdrawalNotice {
                gift_id: gift.id,
                beneficiary_id: b.id,
                trust_id: gift.trust_id,
                beneficiary_name: b.name.clone(),
                beneficiary_percentage: b.withdrawal_percentage,
                withdrawal_amount: b.withdrawal_percentage.share_of(gift.amount)?,
                notice_date: gift.date,
                withdrawal_deadline,
                lapse_period_days,
                status: NoticeStatus::Pending,
                sent_on: None,
                acknowledged_on: None,
                expired_on: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Allocated gift {} ({}) into {} notice(s), deadline {withdrawal_deadline}",
        gift.id,
        gift.amount,
        notices.len()
    );

    Ok(Allocation { notices, warnings })
}

// ============================================================================
// Tests
// ============================================================================

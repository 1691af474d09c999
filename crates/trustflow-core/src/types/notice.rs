//! Crummey withdrawal notices and their lifecycle.
//!
//! ```text
//! pending ──mark_sent──▶ sent ──acknowledge──▶ acknowledged
//!                          │
//!                          └────expire───────▶ expired
//! ```
//!
//! `acknowledged` and `expired` are terminal. A pending notice is never
//! expired: a beneficiary cannot lapse a right they were never told about.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BeneficiaryId, GiftId, Money, NoticeKey, Percentage, TrustId};

/// Delivery and exercise state of a withdrawal notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum NoticeStatus {
    /// Computed but not yet delivered.
    #[default]
    Pending,

    /// Delivery confirmed; the withdrawal window is running.
    Sent,

    /// The beneficiary exercised the right before the deadline.
    Acknowledged,

    /// The window closed without the right being exercised.
    Expired,
}

impl NoticeStatus {
    /// Returns `true` for `Acknowledged` and `Expired`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, NoticeStatus::Acknowledged | NoticeStatus::Expired)
    }

    /// Returns `true` if the lifecycle allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: NoticeStatus) -> bool {
        matches!(
            (self, next),
            (NoticeStatus::Pending, NoticeStatus::Sent)
                | (NoticeStatus::Sent, NoticeStatus::Acknowledged)
                | (NoticeStatus::Sent, NoticeStatus::Expired)
        )
    }
}

impl std::fmt::Display for NoticeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoticeStatus::Pending => write!(f, "pending"),
            NoticeStatus::Sent => write!(f, "sent"),
            NoticeStatus::Acknowledged => write!(f, "acknowledged"),
            NoticeStatus::Expired => write!(f, "expired"),
        }
    }
}

/// A beneficiary's time-limited right to withdraw their share of one gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalNotice {
    /// Gift the right was created by
    pub gift_id: GiftId,

    /// Beneficiary holding the right
    pub beneficiary_id: BeneficiaryId,

    /// Trust the gift was made to
    pub trust_id: TrustId,

    /// Beneficiary name at the time of allocation
    pub beneficiary_name: String,

    /// Beneficiary share at the time of allocation
    pub beneficiary_percentage: Percentage,

    /// Amount the beneficiary may withdraw
    pub withdrawal_amount: Money,

    /// Date the notice was issued (the gift date)
    pub notice_date: NaiveDate,

    /// Last day the right may be exercised
    pub withdrawal_deadline: NaiveDate,

    /// Calendar days between notice and deadline
    pub lapse_period_days: u32,

    /// Current lifecycle state
    #[serde(default)]
    pub status: NoticeStatus,

    /// Day delivery was confirmed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_on: Option<NaiveDate>,

    /// Day the beneficiary exercised the right
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_on: Option<NaiveDate>,

    /// Day the sweep expired the notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_on: Option<NaiveDate>,
}

impl WithdrawalNotice {
    /// Identity of this notice.
    pub fn key(&self) -> NoticeKey {
        NoticeKey::new(self.gift_id, self.beneficiary_id)
    }

    /// Returns `true` once the deadline is strictly before `today`.
    ///
    /// The deadline day itself is still inside the window.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.withdrawal_deadline < today
    }

    /// Records confirmed delivery.
    pub fn mark_sent(&mut self, on: NaiveDate) -> Result<()> {
        self.check_transition(NoticeStatus::Sent)?;
        self.status = NoticeStatus::Sent;
        self.sent_on = Some(on);
        Ok(())
    }

    /// Records that the beneficiary exercised the right on `on`.
    pub fn acknowledge(&mut self, on: NaiveDate) -> Result<()> {
        self.check_transition(NoticeStatus::Acknowledged)?;
        if self.is_overdue(on) {
            return Err(Error::DeadlinePassed {
                deadline: self.withdrawal_deadline,
                attempted: on,
            });
        }
        self.status = NoticeStatus::Acknowledged;
        self.acknowledged_on = Some(on);
        Ok(())
    }

    /// Lapses the right once the window has closed.
    pub fn expire(&mut self, today: NaiveDate) -> Result<()> {
        self.check_transition(NoticeStatus::Expired)?;
        if !self.is_overdue(today) {
            return Err(Error::DeadlineNotReached {
                deadline: self.withdrawal_deadline,
                attempted: today,
            });
        }
        self.status = NoticeStatus::Expired;
        self.expired_on = Some(today);
        Ok(())
    }

    fn check_transition(&self, to: NoticeStatus) -> Result<()> {
        if self.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }
}

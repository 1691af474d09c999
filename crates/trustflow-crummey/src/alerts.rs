//! Upcoming-deadline alerts for trustees.
//!
//! Selects delivered notices whose withdrawal window closes soon so a trustee
//! can be reminded. Sending the reminder is left to the delivery layer.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use trustflow_core::{
    BeneficiaryId, Error, Money, NoticeKey, NoticeStatus, Result, TrustId, WithdrawalNotice,
};

/// Window used when none is configured.
pub const DEFAULT_ALERT_WINDOW_DAYS: u32 = 7;

/// A delivered notice whose deadline falls inside the alert window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineAlert {
    /// Notice the alert is about
    pub key: NoticeKey,
    /// Trust the gift was made to
    pub trust_id: TrustId,
    /// Beneficiary holding the right
    pub beneficiary_id: BeneficiaryId,
    /// Beneficiary name as recorded on the notice
    pub beneficiary_name: String,
    /// Amount that may still be withdrawn
    pub withdrawal_amount: Money,
    /// Date the notice was issued
    pub notice_date: NaiveDate,
    /// Last day the right may be exercised
    pub withdrawal_deadline: NaiveDate,
    /// Whole days from `today` to the deadline, at least 1
    pub days_remaining: i64,
}

/// Finds sent notices with `today < deadline <= today + window_days`.
///
/// Results are ordered by deadline, then by notice key.
pub fn upcoming_deadlines(
    notices: &[WithdrawalNotice],
    today: NaiveDate,
    window_days: u32,
) -> Result<Vec<DeadlineAlert>> {
    if window_days == 0 {
        return Err(Error::validation_field(
            "window_days",
            "alert window must be a positive number of days",
        ));
    }
    let horizon = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .ok_or_else(|| {
            Error::validation_field("window_days", "alert window is outside the calendar")
        })?;

    let mut alerts: Vec<DeadlineAlert> = notices
        .iter()
        .filter(|n| n.status == NoticeStatus::Sent)
        .filter(|n| n.withdrawal_deadline > today && n.withdrawal_deadline <= horizon)
        .map(|n| DeadlineAlert {
            key: n.key(),
            trust_id: n.trust_id,
            beneficiary_id: n.beneficiary_id,
            beneficiary_name: n.beneficiary_name.clone(),
            withdrawal_amount: n.withdrawal_amount,
            notice_date: n.notice_date,
            withdrawal_deadline: n.withdrawal_deadline,
            days_remaining: (n.withdrawal_deadline - today).num_days(),
        })
        .collect();

    alerts.sort_by(|a, b| {
        a.withdrawal_deadline
            .cmp(&b.withdrawal_deadline)
            .then_with(|| a.key.cmp(&b.key))
    });

    log::debug!(
        "{} notice(s) close within {window_days} day(s) of {today}",
        alerts.len()
    );
    Ok(alerts)
}

//! Daily expiry sweep over withdrawal notices.
//!
//! An external scheduler runs [`sweep_expired`] once per day. The sweep moves
//! delivered notices whose window has closed to `expired`, and reports pending
//! notices that reached their deadline without ever being delivered. Those are
//! left untouched: the beneficiary could not have exercised a right they were
//! never told about.
//!
//! Running the sweep twice with the same `today` makes no further changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trustflow_core::{NoticeKey, NoticeStatus, WithdrawalNotice};

/// A pending notice whose deadline passed before delivery was confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("notice {key} reached its deadline {deadline} without being sent")]
pub struct NeverDelivered {
    /// Notice that was never delivered
    pub key: NoticeKey,
    /// Deadline that passed
    pub deadline: NaiveDate,
}

/// Outcome of one sweep run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Day the sweep evaluated deadlines against
    pub swept_on: NaiveDate,
    /// Number of notices examined
    pub checked: usize,
    /// Notices moved from `sent` to `expired`
    pub expired: Vec<NoticeKey>,
    /// Pending notices past their deadline
    pub never_delivered: Vec<NeverDelivered>,
}

impl SweepReport {
    /// Empty report for a run on `swept_on`.
    pub fn new(swept_on: NaiveDate) -> Self {
        Self {
            swept_on,
            checked: 0,
            expired: Vec::new(),
            never_delivered: Vec::new(),
        }
    }

    /// Returns `true` if the run found anything needing attention.
    pub fn has_anomalies(&self) -> bool {
        !self.never_delivered.is_empty()
    }
}

/// Expires overdue delivered notices in place.
pub fn sweep_expired(notices: &mut [WithdrawalNotice], today: NaiveDate) -> SweepReport {
    let mut report = SweepReport::new(today);

    for notice in notices.iter_mut() {
        report.checked += 1;
        if !notice.is_overdue(today) {
            continue;
        }
        match notice.status {
            NoticeStatus::Sent => match notice.expire(today) {
                Ok(()) => {
                    log::debug!("Expired notice {}", notice.key());
                    report.expired.push(notice.key());
                }
                Err(e) => log::error!("Could not expire notice {}: {e}", notice.key()),
            },
            NoticeStatus::Pending => {
                let anomaly = NeverDelivered {
                    key: notice.key(),
                    deadline: notice.withdrawal_deadline,
                };
                log::warn!("{anomaly}");
                report.never_delivered.push(anomaly);
            }
            _ => {}
        }
    }

    log::info!(
        "Notice sweep for {today}: checked {}, expired {}, never delivered {}",
        report.checked,
        report.expired.len(),
        report.never_delivered.len()
    );
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use trustflow_core::{BeneficiaryId, GiftId, Money, Percentage, TrustId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn notice(status: NoticeStatus, deadline: NaiveDate) -> WithdrawalNotice {
        WithdrawalNotice {
            gift_id: GiftId::new(),
            beneficiary_id: BeneficiaryId::new(),
            trust_id: TrustId::new(),
            beneficiary_name: "Alice".to_string(),
            beneficiary_percentage: Percentage::FULL,
            withdrawal_amount: Money::from_dollars(1_000),
            notice_date: date(2025, 6, 1),
            withdrawal_deadline: deadline,
            lapse_period_days: 30,
            status,
            sent_on: None,
            acknowledged_on: None,
            expired_on: None,
        }
    }

    #[test]
    fn test_sent_past_deadline_expires() {
        let mut notices = vec![notice(NoticeStatus::Sent, date(2025, 7, 1))];
        let report = sweep_expired(&mut notices, date(2025, 7, 2));
        assert_eq!(report.swept_on, date(2025, 7, 2));
        assert_eq!(report.checked, 1);
        assert_eq!(report.expired, vec![notices[0].key()]);
        assert_eq!(notices[0].status, NoticeStatus::Expired);
        assert_eq!(notices[0].expired_on, Some(date(2025, 7, 2)));
    }

    #[test]
    fn test_deadline_day_is_not_expired() {
        let mut notices = vec![notice(NoticeStatus::Sent, date(2025, 7, 1))];
        let report = sweep_expired(&mut notices, date(2025, 7, 1));
        assert!(report.expired.is_empty());
        assert_eq!(notices[0].status, NoticeStatus::Sent);
    }

    #[test]
    fn test_pending_past_deadline_is_reported_not_expired() {
        let mut notices = vec![notice(NoticeStatus::Pending, date(2025, 7, 1))];
        let report = sweep_expired(&mut notices, date(2025, 8, 1));
        assert!(report.expired.is_empty());
        assert!(report.has_anomalies());
        assert_eq!(report.never_delivered[0].key, notices[0].key());
        assert_eq!(report.never_delivered[0].deadline, date(2025, 7, 1));
        assert_eq!(notices[0].status, NoticeStatus::Pending);
    }

    #[test]
    fn test_terminal_notices_untouched() {
        let mut notices = vec![
            notice(NoticeStatus::Acknowledged, date(2025, 7, 1)),
            notice(NoticeStatus::Expired, date(2025, 7, 1)),
        ];
        let before = notices.clone();
        let report = sweep_expired(&mut notices, date(2025, 9, 1));
        assert_eq!(report.checked, 2);
        assert!(report.expired.is_empty());
        assert!(!report.has_anomalies());
        assert_eq!(notices, before);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut notices = vec![
            notice(NoticeStatus::Sent, date(2025, 7, 1)),
            notice(NoticeStatus::Sent, date(2025, 12, 1)),
        ];
        let first = sweep_expired(&mut notices, date(2025, 7, 15));
        assert_eq!(first.expired.len(), 1);
        let snapshot = notices.clone();

        let second = sweep_expired(&mut notices, date(2025, 7, 15));
        assert!(second.expired.is_empty());
        assert_eq!(notices, snapshot);
    }

    #[test]
    fn test_report_serializes_plain_date() {
        let report = sweep_expired(&mut [], date(2025, 7, 2));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["swept_on"], "2025-07-02");
        assert_eq!(json["checked"], 0);
    }

    #[test]
    fn test_never_delivered_display() {
        let n = notice(NoticeStatus::Pending, date(2025, 7, 1));
        let err = NeverDelivered {
            key: n.key(),
            deadline: n.withdrawal_deadline,
        };
        assert!(err.to_string().ends_with("reached its deadline 2025-07-01 without being sent"));
    }
}

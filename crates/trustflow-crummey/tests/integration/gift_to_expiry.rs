//! A gift followed through every lifecycle path.

use trustflow_core::{Money, NoticeStatus};
use trustflow_crummey::{CrummeyConfig, allocate, sweep_expired, upcoming_deadlines};

use crate::common::{TrustFixture, date};

#[test]
fn test_thirty_six_thousand_dollar_gift() {
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(36_000, date(2025, 6, 1));

    let allocation = allocate(&gift, &trust.beneficiaries(), 30).expect("allocation succeeds");

    assert!(allocation.warnings.is_empty());
    let amounts: Vec<(String, Money)> = allocation
        .notices
        .iter()
        .map(|n| (n.beneficiary_name.clone(), n.withdrawal_amount))
        .collect();
    assert_eq!(
        amounts,
        vec![
            ("Alice Johnson".to_string(), Money::from_dollars(21_600)),
            ("Bob Johnson".to_string(), Money::from_dollars(14_400)),
        ]
    );
    assert!(
        allocation
            .notices
            .iter()
            .all(|n| n.withdrawal_deadline == date(2025, 7, 1))
    );
}

#[test]
fn test_acknowledged_beats_expiry() {
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(36_000, date(2025, 6, 1));
    let mut notices = allocate(&gift, &trust.beneficiaries(), 30).unwrap().notices;

    for n in notices.iter_mut() {
        n.mark_sent(date(2025, 6, 2)).unwrap();
    }
    // Alice exercises her right on the last day; Bob lets his lapse.
    notices[0].acknowledge(date(2025, 7, 1)).unwrap();

    let report = sweep_expired(&mut notices, date(2025, 7, 2));

    assert_eq!(report.checked, 2);
    assert_eq!(report.expired, vec![notices[1].key()]);
    assert_eq!(notices[0].status, NoticeStatus::Acknowledged);
    assert_eq!(notices[1].status, NoticeStatus::Expired);
}

#[test]
fn test_undelivered_notice_surfaces_instead_of_expiring() {
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(10_000, date(2025, 6, 1));
    let mut notices = allocate(&gift, &trust.beneficiaries(), 30).unwrap().notices;
    notices[1].mark_sent(date(2025, 6, 3)).unwrap();

    let report = sweep_expired(&mut notices, date(2025, 7, 10));

    assert_eq!(report.expired, vec![notices[1].key()]);
    assert_eq!(report.never_delivered.len(), 1);
    assert_eq!(report.never_delivered[0].key, notices[0].key());
    assert_eq!(notices[0].status, NoticeStatus::Pending);
}

#[test]
fn test_alerts_then_sweep_with_configured_window() {
    let config = CrummeyConfig::default();
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(20_000, date(2025, 6, 1));
    let mut notices = allocate(&gift, &trust.beneficiaries(), config.lapse_period_days)
        .unwrap()
        .notices;
    notices[0].mark_sent(date(2025, 6, 1)).unwrap();

    let alerts = upcoming_deadlines(&notices, date(2025, 6, 26), config.alert_window_days).unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].days_remaining, 5);
    assert_eq!(alerts[0].withdrawal_amount, Money::from_dollars(12_000));

    let report = sweep_expired(&mut notices, date(2025, 6, 26));
    assert!(report.expired.is_empty());
    assert!(report.never_delivered.is_empty());
}

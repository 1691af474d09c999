//! Recording payments and checking that gifts cover upcoming premiums.

use crate::common::{JohnsonTrust, date};
use rust_decimal::Decimal;
use trustflow_core::{Money, PremiumPayment};
use trustflow_premium::{DEFAULT_LOOKAHEAD_DAYS, check_funds_sufficiency, record_payment};

#[test]
fn test_midyear_check_is_sufficient() {
    let trust = JohnsonTrust::new();
    let check = check_funds_sufficiency(
        trust.trust_id,
        &trust.gifts,
        &trust.policies(),
        &trust.payments,
        date(2025, 6, 15),
        DEFAULT_LOOKAHEAD_DAYS,
    )
    .unwrap();

    // 35,000 in gifts less 15,600 paid; only the July premium is in the window.
    assert_eq!(check.available_funds, Money::from_dollars(19_400));
    assert_eq!(check.required_funds, Money::from_dollars(24_000));
    assert_eq!(check.upcoming_policies, vec![trust.survivorship.id]);
    assert!(!check.is_sufficient);
    assert_eq!(check.shortfall, Money::from_dollars(4_600));
    assert_eq!(check.months_of_coverage, Some(Decimal::from(9)));
}

#[test]
fn test_recording_a_payment_moves_the_window() {
    let mut trust = JohnsonTrust::new();
    let today = date(2025, 7, 1);
    let payment =
        PremiumPayment::new(trust.survivorship.id, Money::from_dollars(6_000), today).unwrap();

    let recorded = record_payment(&mut trust.survivorship, payment, today).unwrap();
    assert_eq!(recorded.next_premium_due, date(2025, 10, 1));
    trust.payments.push(recorded.payment);

    let check = check_funds_sufficiency(
        trust.trust_id,
        &trust.gifts,
        &trust.policies(),
        &trust.payments,
        today,
        60,
    )
    .unwrap();
    assert_eq!(check.available_funds, Money::from_dollars(13_400));
    assert!(check.upcoming_policies.is_empty());
    assert!(check.is_sufficient);
}

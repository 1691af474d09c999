//! Reporting on premiums paid.

use crate::common::{JohnsonTrust, date};
use trustflow_core::Money;
use trustflow_premium::{PaymentFilter, payments_filename, summarize_payments, to_csv_string};

#[test]
fn test_2025_payments_for_the_trust() {
    let trust = JohnsonTrust::new();
    let filter =
        PaymentFilter::between(date(2025, 1, 1), date(2025, 12, 31)).with_trust(trust.trust_id);
    let summary = summarize_payments(&trust.payments, &trust.policies(), &filter).unwrap();

    assert_eq!(summary.payment_count, 2);
    assert_eq!(summary.total_amount, Money::from_dollars(12_000));
    assert_eq!(summary.average_payment, Money::from_dollars(6_000));
    assert_eq!(summary.payments[0].payment_date, date(2025, 4, 1));
    assert!(summary.payments.iter().all(|r| r.policy_number == "NYL-2231"));
}

#[test]
fn test_all_time_by_policy() {
    let trust = JohnsonTrust::new();
    let filter = PaymentFilter::default().with_policy(trust.term.id);
    let summary = summarize_payments(&trust.payments, &trust.policies(), &filter).unwrap();
    assert_eq!(summary.payment_count, 1);
    assert_eq!(summary.total_amount, Money::from_dollars(3_600));
}

#[test]
fn test_csv_export() {
    let trust = JohnsonTrust::new();
    let summary =
        summarize_payments(&trust.payments, &trust.policies(), &PaymentFilter::default()).unwrap();
    let csv = to_csv_string(&summary).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2025-04-01,NYL-2231,"));
    assert!(lines[1].ends_with(",6000.00,wire,completed,"));
    assert!(lines[3].starts_with("2024-11-15,PRU-884,"));
    assert_eq!(
        payments_filename(date(2025, 7, 4)),
        "premium-payments-2025-07-04.csv"
    );
}

#[test]
fn test_summary_json_shape() {
    let trust = JohnsonTrust::new();
    let summary =
        summarize_payments(&trust.payments, &trust.policies(), &PaymentFilter::default()).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["payment_count"], 3);
    let total: Money = serde_json::from_value(json["total_amount"].clone()).unwrap();
    assert_eq!(total, Money::from_dollars(15_600));
    assert_eq!(json["payments"].as_array().unwrap().len(), 3);
}

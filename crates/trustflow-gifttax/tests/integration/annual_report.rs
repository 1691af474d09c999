//! A year-end report over a mixed gift history.

use crate::common::GiftHistory;
use trustflow_core::Money;
use trustflow_gifttax::{
    ExclusionSource, GiftTaxAggregator, SummaryFilter, export_filename, to_csv_string,
};

#[test]
fn test_2025_report_flags_mark_johnson() {
    let history = GiftHistory::new();
    let summary = GiftTaxAggregator::default()
        .summarize(&history.gifts, &SummaryFilter::for_year(2025))
        .unwrap();

    let mark: Vec<_> = summary
        .rows
        .iter()
        .filter(|r| r.donor_name == "Mark Johnson")
        .collect();
    assert_eq!(mark.len(), 2);

    let to_johnson = mark
        .iter()
        .find(|r| r.trust_id == history.johnson_trust)
        .unwrap();
    assert_eq!(to_johnson.total, Money::from_dollars(30_000));
    assert_eq!(to_johnson.gift_count, 3);
    assert_eq!(to_johnson.exclusion, Money::from_dollars(19_000));
    assert_eq!(to_johnson.exclusion_source, ExclusionSource::Exact);
    assert!(to_johnson.exceeds_exclusion);
    assert_eq!(to_johnson.excess, Money::from_dollars(11_000));
    assert_eq!(to_johnson.donor_email.as_deref(), Some("mark@example.com"));

    let to_lee = mark
        .iter()
        .find(|r| r.trust_id == history.lee_trust)
        .unwrap();
    assert!(!to_lee.exceeds_exclusion);

    assert_eq!(summary.totals.donor_count, 2);
    assert_eq!(summary.totals.trust_count, 2);
    assert_eq!(summary.totals.gift_count, 5);
    assert_eq!(summary.totals.total_gifts, Money::from_dollars(47_000));
    assert_eq!(summary.totals.rows_exceeding, 1);
    assert_eq!(summary.totals.total_excess, Money::from_dollars(11_000));
}

#[test]
fn test_all_years_report_keeps_2024_separate() {
    let history = GiftHistory::new();
    let summary = GiftTaxAggregator::default()
        .summarize(&history.gifts, &SummaryFilter::default())
        .unwrap();

    let row_2024 = summary
        .rows
        .iter()
        .find(|r| r.tax_year == 2024)
        .unwrap();
    assert_eq!(row_2024.total, Money::from_dollars(18_000));
    assert_eq!(row_2024.exclusion, Money::from_dollars(18_000));
    assert!(!row_2024.exceeds_exclusion);
}

#[test]
fn test_csv_export_matches_rows() {
    let history = GiftHistory::new();
    let summary = GiftTaxAggregator::default()
        .summarize(&history.gifts, &SummaryFilter::for_year(2025))
        .unwrap();
    let csv = to_csv_string(&summary).unwrap();

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + summary.rows.len());
    assert!(lines[0].starts_with("Tax Year,Donor Name"));
    assert_eq!(lines.iter().filter(|l| l.ends_with(",Yes")).count(), 1);
    assert!(csv.contains("30000.00,3,19000.00,11000.00,Yes"));
    assert_eq!(export_filename(summary.tax_year), "gift-tax-summary-2025.csv");
}

#[test]
fn test_summary_serializes_for_api_consumers() {
    let history = GiftHistory::new();
    let summary = GiftTaxAggregator::default()
        .summarize(&history.gifts, &SummaryFilter::for_year(2025))
        .unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["tax_year"], 2025);
    assert_eq!(json["rows"][0]["exclusion_source"]["kind"], "exact");
    assert_eq!(json["totals"]["rows_exceeding"], 1);
}

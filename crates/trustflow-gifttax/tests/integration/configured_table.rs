//! Exclusion tables built from configuration.

use crate::common::{date, gift};
use trustflow_core::{Money, TrustId};
use trustflow_gifttax::{
    AnnualExclusionTable, ExclusionSource, GiftTaxAggregator, GiftTaxConfig, SummaryFilter,
};

#[test]
fn test_absent_year_falls_back_to_2024() {
    let table = AnnualExclusionTable::irs_default();
    assert_eq!(table.lookup(2030), table.lookup(2024));
    assert_eq!(table.lookup(2030), Money::from_dollars(18_000));
}

#[test]
fn test_configured_table_drives_summary() {
    let config: GiftTaxConfig = toml::from_str(
        r#"
        fallback = "most_recent"
        exclusions = [
            { year = 2025, amount = "19000" },
            { year = 2027, amount = "21000" },
        ]
        "#,
    )
    .unwrap();
    let aggregator = GiftTaxAggregator::new(config.build_table().unwrap());

    let trust = TrustId::new();
    let gifts = vec![gift(trust, "Mark Johnson", 20_000, date(2028, 2, 1))];
    let summary = aggregator
        .summarize(&gifts, &SummaryFilter::default())
        .unwrap();

    let row = &summary.rows[0];
    assert_eq!(row.exclusion, Money::from_dollars(21_000));
    assert_eq!(
        row.exclusion_source,
        ExclusionSource::Fallback {
            requested: 2028,
            used: 2027
        }
    );
    assert!(!row.exceeds_exclusion);
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = GiftTaxConfig::default();
    let text = toml::to_string(&config).unwrap();
    let back: GiftTaxConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

//! CSV export of gift-tax summaries.

use std::io::Write;

use crate::error::Result;
use crate::summary::{GiftTaxSummary, GiftTaxSummaryRow};

/// Column headings, in output order.
pub const CSV_HEADER: [&str; 9] = [
    "Tax Year",
    "Donor Name",
    "Donor Email",
    "Trust",
    "Total Gifts",
    "Gift Count",
    "Annual Exclusion",
    "Excess Amount",
    "Requires 709",
];

/// Suggested file name for an export.
///
/// # Examples
///
/// ```
/// use trustflow_gifttax::export_filename;
///
/// assert_eq!(export_filename(Some(2025)), "gift-tax-summary-2025.csv");
/// assert_eq!(export_filename(None), "gift-tax-summary-all.csv");
/// ```
pub fn export_filename(tax_year: Option<i32>) -> String {
    match tax_year {
        Some(year) => format!("gift-tax-summary-{year}.csv"),
        None => "gift-tax-summary-all.csv".to_string(),
    }
}

fn record(row: &GiftTaxSummaryRow) -> [String; 9] {
    [
        row.tax_year.to_string(),
        row.donor_name.clone(),
        row.donor_email.clone().unwrap_or_default(),
        row.trust_id.to_string(),
        row.total.round_to_cents().to_string(),
        row.gift_count.to_string(),
        row.exclusion.round_to_cents().to_string(),
        row.excess.round_to_cents().to_string(),
        if row.exceeds_exclusion { "Yes" } else { "No" }.to_string(),
    ]
}

/// Writes the summary as CSV, header first, one line per row.
pub fn write_csv<W: Write>(summary: &GiftTaxSummary, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;
    for row in &summary.rows {
        csv.write_record(record(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders the summary as a CSV string.
pub fn to_csv_string(summary: &GiftTaxSummary) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(summary, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

//! CSV export of premium payment summaries.

use std::io::Write;

use chrono::NaiveDate;

use crate::error::Result;
use crate::payments::{PaymentRecord, PremiumPaymentSummary};

/// Column headings, in output order.
pub const PAYMENT_CSV_HEADER: [&str; 7] = [
    "Payment Date",
    "Policy Number",
    "Trust",
    "Amount",
    "Payment Method",
    "Status",
    "Notes",
];

/// Suggested file name for an export generated on `generated_on`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use trustflow_premium::payments_filename;
///
/// let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
/// assert_eq!(payments_filename(day), "premium-payments-2025-07-04.csv");
/// ```
pub fn payments_filename(generated_on: NaiveDate) -> String {
    format!("premium-payments-{generated_on}.csv")
}

fn record(row: &PaymentRecord) -> [String; 7] {
    [
        row.payment_date.to_string(),
        row.policy_number.clone(),
        row.trust_id.to_string(),
        row.amount.round_to_cents().to_string(),
        row.payment_method.clone().unwrap_or_else(|| "N/A".to_string()),
        row.status.to_string(),
        row.notes.clone().unwrap_or_default(),
    ]
}

/// Writes the summary's payments as CSV, header first.
pub fn write_csv<W: Write>(summary: &PremiumPaymentSummary, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(PAYMENT_CSV_HEADER)?;
    for row in &summary.payments {
        csv.write_record(record(row))?;
    }
    csv.flush()?;
    Ok(())
}

/// Renders the summary's payments as a CSV string.
pub fn to_csv_string(summary: &PremiumPaymentSummary) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(summary, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

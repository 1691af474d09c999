#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! TrustFlow gift-tax reporting
//!
//! # Modules
//!
//! - [`exclusion`]: year → annual exclusion lookup with fallback
//! - [`summary`]: per donor, trust and year totals against the exclusion
//! - [`export`]: CSV rendering of a summary
//! - [`config`]: exclusion table as configured

pub mod config;
pub mod error;
pub mod exclusion;
pub mod export;
mod proptests;
pub mod summary;

pub use config::GiftTaxConfig;
pub use error::{Error, Result};
pub use exclusion::{
    AnnualExclusionTable, DEFAULT_FALLBACK_YEAR, ExclusionEntry, ExclusionLimit, ExclusionSource,
    FallbackPolicy, IRS_ANNUAL_EXCLUSIONS,
};
pub use export::{CSV_HEADER, export_filename, to_csv_string, write_csv};
pub use summary::{
    GiftTaxAggregator, GiftTaxSummary, GiftTaxSummaryRow, SummaryFilter, SummaryTotals,
};

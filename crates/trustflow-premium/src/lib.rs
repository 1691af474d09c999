#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! TrustFlow premium tracking
//!
//! # Modules
//!
//! - [`payments`]: filtered payment history with total, count and average
//! - [`record`]: validating a new payment and advancing the policy's due date
//! - [`sufficiency`]: available funds against upcoming premiums
//! - [`export`]: CSV rendering of a payment summary
//! - [`config`]: look-ahead window as configured

pub mod config;
pub mod error;
pub mod export;
pub mod payments;
mod proptests;
pub mod record;
pub mod sufficiency;

pub use config::PremiumConfig;
pub use error::{Error, Result};
pub use export::{PAYMENT_CSV_HEADER, payments_filename, to_csv_string, write_csv};
pub use payments::{PaymentFilter, PaymentRecord, PremiumPaymentSummary, summarize_payments};
pub use record::{RecordedPayment, record_payment};
pub use sufficiency::{DEFAULT_LOOKAHEAD_DAYS, SufficiencyCheck, check_funds_sufficiency};

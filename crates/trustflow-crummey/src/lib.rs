#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! TrustFlow Crummey notices
//!
//! Turns recorded gifts into withdrawal rights and keeps those rights moving
//! through their lifecycle.
//!
//! # Modules
//!
//! - [`allocation`]: gift → notices, plus the beneficiary share invariant
//! - [`sweep`]: daily expiry of lapsed rights
//! - [`alerts`]: deadlines closing inside a reminder window
//! - [`config`]: lapse period and alert window settings

pub mod alerts;
pub mod allocation;
pub mod config;
mod proptests;
pub mod sweep;

pub use alerts::{DEFAULT_ALERT_WINDOW_DAYS, DeadlineAlert, upcoming_deadlines};
pub use allocation::{
    Allocation, AllocationWarning, DEFAULT_LAPSE_PERIOD_DAYS, PercentageCheck, allocate,
    check_percentage_total, validate_beneficiary_set,
};
pub use config::CrummeyConfig;
pub use sweep::{NeverDelivered, SweepReport, sweep_expired};

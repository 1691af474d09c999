//! # trustflow-cli
//!
//! Command-line front end for TrustFlow.
//!
//! Runs the library operations over JSON snapshot files:
//! - Gift allocation into Crummey withdrawal notices
//! - Beneficiary share validation
//! - Daily expiry sweep and deadline alerts
//! - Gift-tax summaries as JSON or CSV
//! - Premium payment history, funds sufficiency and payment recording
//! - Configuration management

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use cli::{Cli, Command, ConfigAction, OutputFormat};
pub use config::TrustflowConfig;
pub use error::{Error, Result};

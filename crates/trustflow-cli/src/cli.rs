//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use trustflow_core::{PolicyId, TrustId};

/// TrustFlow: Crummey notices, gift-tax reporting and premium tracking for ILITs
#[derive(Parser, Debug)]
#[command(name = "trustflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute withdrawal notices for a recorded gift
    Allocate {
        /// Gift JSON file
        #[arg(long)]
        gift: PathBuf,

        /// Beneficiary list JSON file (the trust's current beneficiaries)
        #[arg(long)]
        beneficiaries: PathBuf,

        /// Lapse period in days (overrides config)
        #[arg(long)]
        lapse_days: Option<u32>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a beneficiary list is ready for allocation
    ValidateBeneficiaries {
        /// Beneficiary list JSON file
        #[arg(long)]
        beneficiaries: PathBuf,
    },

    /// Summarize gifts per donor, trust and year against the annual exclusion
    Summarize {
        /// Gift list JSON file
        #[arg(long)]
        gifts: PathBuf,

        /// Only this tax year
        #[arg(long)]
        year: Option<i32>,

        /// Only donors whose name contains this text
        #[arg(long)]
        donor: Option<String>,

        /// Only this trust
        #[arg(long)]
        trust_id: Option<TrustId>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Expire delivered notices whose deadline has passed
    Sweep {
        /// Notice list JSON file
        #[arg(long)]
        notices: PathBuf,

        /// Evaluate deadlines as of this date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Rewrite the notice file with updated statuses
        #[arg(long)]
        write: bool,
    },

    /// List delivered notices whose deadline is coming up
    Alerts {
        /// Notice list JSON file
        #[arg(long)]
        notices: PathBuf,

        /// Evaluate deadlines as of this date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Days ahead to look (overrides config)
        #[arg(long)]
        window_days: Option<u32>,
    },

    /// Show the annual exclusion for a tax year
    Exclusion {
        /// Tax year
        #[arg(long)]
        year: i32,
    },

    /// Summarize premium payments over a date range
    Premiums {
        /// Premium payment list JSON file
        #[arg(long)]
        payments: PathBuf,

        /// Insurance policy list JSON file
        #[arg(long)]
        policies: PathBuf,

        /// First payment date to include
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last payment date to include
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Only policies held by this trust
        #[arg(long)]
        trust_id: Option<TrustId>,

        /// Only this policy
        #[arg(long)]
        policy_id: Option<PolicyId>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare a trust's unspent gifts with its upcoming premiums
    Sufficiency {
        /// Trust to check
        #[arg(long)]
        trust_id: TrustId,

        /// Gift list JSON file
        #[arg(long)]
        gifts: PathBuf,

        /// Insurance policy list JSON file
        #[arg(long)]
        policies: PathBuf,

        /// Premium payment list JSON file
        #[arg(long)]
        payments: Option<PathBuf>,

        /// Evaluate as of this date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Days ahead to count premiums as due (overrides config)
        #[arg(long)]
        lookahead_days: Option<u32>,
    },

    /// Record a premium payment and advance its policy's due date
    RecordPayment {
        /// Premium payment JSON file
        #[arg(long)]
        payment: PathBuf,

        /// Insurance policy list JSON file
        #[arg(long)]
        policies: PathBuf,

        /// Evaluate the payment date as of this date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Rewrite the policy file with the new due date
        #[arg(long)]
        write: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigAction),
}

/// Output encodings for reports.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// CSV for spreadsheets
    Csv,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print a value by dotted key
    Get {
        /// Dotted key, e.g. `crummey.lapse_period_days`
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },

    /// Write a default config file
    Init {
        /// Where to write it (default: platform config dir)
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print settings as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}

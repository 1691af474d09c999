//! Command implementations.
//!
//! Each command reads JSON snapshots, runs one library operation and renders
//! the result. Reports go to stdout (or `--output`); diagnostics go through
//! `log` so that stdout stays machine readable.

use std::path::Path;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use trustflow_core::{
    Beneficiary, Gift, InsurancePolicy, PremiumPayment, TrustId, WithdrawalNotice,
};
use trustflow_crummey::{allocate, sweep_expired, upcoming_deadlines, validate_beneficiary_set};
use trustflow_gifttax::{GiftTaxAggregator, SummaryFilter, export_filename, to_csv_string};
use trustflow_premium::{
    PaymentFilter, check_funds_sufficiency, payments_filename, record_payment, summarize_payments,
};

use crate::cli::{Cli, Command, OutputFormat};
use crate::config::TrustflowConfig;
use crate::config_handlers::handle_config_command;
use crate::error::{Error, Result};

/// Runs the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let command = match cli.command {
        Command::Config(action) => return handle_config_command(config_path, action),
        other => other,
    };

    let config = TrustflowConfig::load(config_path)?;
    match command {
        Command::Allocate {
            gift,
            beneficiaries,
            lapse_days,
            output,
        } => {
            let lapse = lapse_days.unwrap_or(config.crummey.lapse_period_days);
            let rendered = cmd_allocate(&gift, &beneficiaries, lapse)?;
            emit(&rendered, output.as_deref())
        }
        Command::ValidateBeneficiaries { beneficiaries } => {
            cmd_validate_beneficiaries(&beneficiaries)
        }
        Command::Summarize {
            gifts,
            year,
            donor,
            trust_id,
            format,
            output,
        } => {
            let filter = SummaryFilter {
                year,
                donor,
                trust_id,
            };
            let rendered = cmd_summarize(&config, &gifts, &filter, format)?;
            emit(&rendered, output.as_deref())
        }
        Command::Sweep {
            notices,
            today,
            write,
        } => {
            let rendered = cmd_sweep(&notices, today.unwrap_or_else(local_today), write)?;
            emit(&rendered, None)
        }
        Command::Alerts {
            notices,
            today,
            window_days,
        } => {
            let window = window_days.unwrap_or(config.crummey.alert_window_days);
            let rendered = cmd_alerts(&notices, today.unwrap_or_else(local_today), window)?;
            emit(&rendered, None)
        }
        Command::Exclusion { year } => {
            let limit = config.exclusion_table()?.resolve(year);
            emit(&to_json(&limit)?, None)
        }
        Command::Premiums {
            payments,
            policies,
            start,
            end,
            trust_id,
            policy_id,
            format,
            output,
        } => {
            let filter = PaymentFilter {
                start,
                end,
                trust_id,
                policy_id,
            };
            let rendered = cmd_premiums(&payments, &policies, &filter, format)?;
            emit(&rendered, output.as_deref())
        }
        Command::Sufficiency {
            trust_id,
            gifts,
            policies,
            payments,
            today,
            lookahead_days,
        } => {
            let lookahead = lookahead_days.unwrap_or(config.premium.lookahead_days);
            let rendered = cmd_sufficiency(
                trust_id,
                &gifts,
                &policies,
                payments.as_deref(),
                today.unwrap_or_else(local_today),
                lookahead,
            )?;
            emit(&rendered, None)
        }
        Command::RecordPayment {
            payment,
            policies,
            today,
            write,
        } => {
            let rendered = cmd_record_payment(
                &payment,
                &policies,
                today.unwrap_or_else(local_today),
                write,
            )?;
            emit(&rendered, None)
        }
        Command::Config(_) => Ok(()),
    }
}

/// Allocates one gift across a beneficiary snapshot.
pub fn cmd_allocate(gift: &Path, beneficiaries: &Path, lapse_days: u32) -> Result<String> {
    let gift: Gift = read_json(gift)?;
    let beneficiaries: Vec<Beneficiary> = read_json(beneficiaries)?;

    let allocation = allocate(&gift, &beneficiaries, lapse_days)?;
    for warning in &allocation.warnings {
        log::warn!("Gift {}: {warning}", gift.id);
    }
    log::info!(
        "Allocated gift {} into {} notice(s) totaling {}",
        gift.id,
        allocation.notices.len(),
        allocation.total_withdrawable()?
    );
    to_json(&allocation)
}

/// Validates a beneficiary list and reports the outcome on stdout.
pub fn cmd_validate_beneficiaries(beneficiaries: &Path) -> Result<()> {
    let list: Vec<Beneficiary> = read_json(beneficiaries)?;
    validate_beneficiary_set(&list)?;
    println!("OK: {} beneficiaries, shares total 100%", list.len());
    Ok(())
}

/// Summarizes gifts against the configured exclusion table.
pub fn cmd_summarize(
    config: &TrustflowConfig,
    gifts: &Path,
    filter: &SummaryFilter,
    format: OutputFormat,
) -> Result<String> {
    let gifts: Vec<Gift> = read_json(gifts)?;
    let aggregator = GiftTaxAggregator::new(config.exclusion_table()?);
    let summary = aggregator.summarize(&gifts, filter)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Csv => {
            log::debug!("Suggested file name: {}", export_filename(summary.tax_year));
            Ok(to_csv_string(&summary)?)
        }
    }
}

/// Runs the expiry sweep, optionally rewriting the notice file.
pub fn cmd_sweep(notices: &Path, today: NaiveDate, write: bool) -> Result<String> {
    let mut list: Vec<WithdrawalNotice> = read_json(notices)?;
    let report = sweep_expired(&mut list, today);

    if write && !report.expired.is_empty() {
        std::fs::write(notices, to_json(&list)?).map_err(|e| Error::io_with_path(e, notices))?;
        log::info!("Updated {}", notices.display());
    }
    to_json(&report)
}

/// Lists delivered notices closing within `window_days`.
pub fn cmd_alerts(notices: &Path, today: NaiveDate, window_days: u32) -> Result<String> {
    let list: Vec<WithdrawalNotice> = read_json(notices)?;
    let alerts = upcoming_deadlines(&list, today, window_days)?;
    to_json(&alerts)
}

/// Summarizes premium payments matching `filter`.
pub fn cmd_premiums(
    payments: &Path,
    policies: &Path,
    filter: &PaymentFilter,
    format: OutputFormat,
) -> Result<String> {
    let payments: Vec<PremiumPayment> = read_json(payments)?;
    let policies: Vec<InsurancePolicy> = read_json(policies)?;
    let summary = summarize_payments(&payments, &policies, filter)?;

    match format {
        OutputFormat::Json => to_json(&summary),
        OutputFormat::Csv => {
            log::debug!("Suggested file name: {}", payments_filename(local_today()));
            Ok(trustflow_premium::to_csv_string(&summary)?)
        }
    }
}

/// Compares a trust's unspent gifts with premiums due in the look-ahead.
pub fn cmd_sufficiency(
    trust_id: TrustId,
    gifts: &Path,
    policies: &Path,
    payments: Option<&Path>,
    today: NaiveDate,
    lookahead_days: u32,
) -> Result<String> {
    let gifts: Vec<Gift> = read_json(gifts)?;
    let policies: Vec<InsurancePolicy> = read_json(policies)?;
    let payments: Vec<PremiumPayment> = match payments {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let check = check_funds_sufficiency(
        trust_id,
        &gifts,
        &policies,
        &payments,
        today,
        lookahead_days,
    )?;
    to_json(&check)
}

/// Records one payment against its policy, optionally rewriting the policy
/// file with the advanced due date.
pub fn cmd_record_payment(
    payment: &Path,
    policies: &Path,
    today: NaiveDate,
    write: bool,
) -> Result<String> {
    let payment: PremiumPayment = read_json(payment)?;
    let mut list: Vec<InsurancePolicy> = read_json(policies)?;
    let policy = list
        .iter_mut()
        .find(|p| p.id == payment.policy_id)
        .ok_or_else(|| {
            trustflow_core::Error::validation_field(
                "policy_id",
                format!("no policy {} in {}", payment.policy_id, policies.display()),
            )
        })?;

    let recorded = record_payment(policy, payment, today)?;
    if write {
        std::fs::write(policies, to_json(&list)?).map_err(|e| Error::io_with_path(e, policies))?;
        log::info!("Updated {}", policies.display());
    }
    to_json(&recorded)
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    serde_json::from_str(&content).map_err(|source| Error::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|e| Error::io_with_path(e, path))?;
            log::info!("Wrote {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

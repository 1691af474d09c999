//! TrustFlow configuration file.
//!
//! Resolution order for the file: `--config`, then `TRUSTFLOW_CONFIG`, then
//! `<config dir>/trustflow/config.toml`. A missing file is not an error; every
//! setting has a default. Environment overrides are applied after the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trustflow_crummey::CrummeyConfig;
use trustflow_gifttax::{AnnualExclusionTable, FallbackPolicy, GiftTaxConfig};
use trustflow_premium::PremiumConfig;

use crate::error::{Error, Result};

/// Name used for the config directory and in user-facing hints.
pub const PROJECT_NAME: &str = "trustflow";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TRUSTFLOW_CONFIG";

/// Overrides `crummey.lapse_period_days`.
pub const ENV_LAPSE_PERIOD_DAYS: &str = "TRUSTFLOW_LAPSE_PERIOD_DAYS";

/// Overrides `crummey.alert_window_days`.
pub const ENV_ALERT_WINDOW_DAYS: &str = "TRUSTFLOW_ALERT_WINDOW_DAYS";

/// Overrides `gift_tax.fallback` with a fixed year.
pub const ENV_EXCLUSION_FALLBACK_YEAR: &str = "TRUSTFLOW_EXCLUSION_FALLBACK_YEAR";

/// Overrides `premium.lookahead_days`.
pub const ENV_PREMIUM_LOOKAHEAD_DAYS: &str = "TRUSTFLOW_PREMIUM_LOOKAHEAD_DAYS";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustflowConfig {
    /// Notice allocation and alert settings
    #[serde(default)]
    pub crummey: CrummeyConfig,

    /// Exclusion table and fallback policy
    #[serde(default)]
    pub gift_tax: GiftTaxConfig,

    /// Funds-sufficiency look-ahead
    #[serde(default)]
    pub premium: PremiumConfig,
}

impl TrustflowConfig {
    /// Platform default location of the config file.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// Resolves the config file path against the process environment.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        Self::resolve_config_path_with(explicit, process_env)
    }

    /// Resolves the config file path using `env` for variable lookups.
    pub fn resolve_config_path_with<F>(explicit: Option<&str>, env: F) -> Option<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = env(CONFIG_ENV_VAR).filter(|p| !p.trim().is_empty()) {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Loads, overrides and validates configuration from the process
    /// environment.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with(explicit, process_env)
    }

    /// Like [`load`](Self::load), with `env` standing in for the environment.
    pub fn load_with<F>(explicit: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match Self::resolve_config_path_with(explicit, &env) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                log::debug!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides_from(&env)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Applies `TRUSTFLOW_*` overrides looked up through `env`.
    pub fn apply_env_overrides_from<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(days) = parse_env::<u32, _>(&env, ENV_LAPSE_PERIOD_DAYS)? {
            self.crummey.lapse_period_days = days;
        }
        if let Some(days) = parse_env::<u32, _>(&env, ENV_ALERT_WINDOW_DAYS)? {
            self.crummey.alert_window_days = days;
        }
        if let Some(year) = parse_env::<i32, _>(&env, ENV_EXCLUSION_FALLBACK_YEAR)? {
            self.gift_tax.fallback = FallbackPolicy::Year(year);
        }
        if let Some(days) = parse_env::<u32, _>(&env, ENV_PREMIUM_LOOKAHEAD_DAYS)? {
            self.premium.lookahead_days = days;
        }
        Ok(())
    }

    /// Rejects settings the commands would refuse to run with.
    pub fn validate(&self) -> Result<()> {
        self.crummey.validate()?;
        self.gift_tax.build_table()?;
        self.premium.validate()?;
        Ok(())
    }

    /// Exclusion table to inject into the aggregator.
    pub fn exclusion_table(&self) -> Result<AnnualExclusionTable> {
        Ok(self.gift_tax.build_table()?)
    }

    /// Serializes to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Settings expressible as environment overrides.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        let mut vars = vec![
            (
                ENV_LAPSE_PERIOD_DAYS.to_string(),
                self.crummey.lapse_period_days.to_string(),
            ),
            (
                ENV_ALERT_WINDOW_DAYS.to_string(),
                self.crummey.alert_window_days.to_string(),
            ),
            (
                ENV_PREMIUM_LOOKAHEAD_DAYS.to_string(),
                self.premium.lookahead_days.to_string(),
            ),
        ];
        if let FallbackPolicy::Year(year) = self.gift_tax.fallback {
            vars.push((ENV_EXCLUSION_FALLBACK_YEAR.to_string(), year.to_string()));
        }
        vars
    }
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn parse_env<T, F>(env: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match env(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::config(format!("{key}={raw}: {e}"))),
        _ => Ok(None),
    }
}

// ============================================================================
// Tests
// ============================================================================

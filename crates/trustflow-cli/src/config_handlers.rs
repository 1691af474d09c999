//! Handler functions for `trustflow config` subcommands.
//!
//! Implements `path`, `get`, `set`, `init` and `export` over
//! [`TrustflowConfig`], plus the TOML dotted-key helpers they share.

use std::path::PathBuf;

use crate::cli::ConfigAction;
use crate::config::{PROJECT_NAME, TrustflowConfig};
use crate::error::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = TrustflowConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = TrustflowConfig::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Get a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = TrustflowConfig::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => {
            println!("{}", format_toml_value(val));
            Ok(())
        }
        None => Err(Error::config(format!(
            "Key '{key}' not found in configuration"
        ))),
    }
}

/// Set a configuration value by dotted key in the config file.
///
/// The edited document must still load as a valid configuration, otherwise
/// the file is left untouched.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = TrustflowConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{PROJECT_NAME} config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    let mut doc = toml::Value::Table(table);

    set_nested_value(&mut doc, key, parse_value(value))?;

    let updated: TrustflowConfig = doc
        .clone()
        .try_into()
        .map_err(|e| Error::config(format!("Invalid value for {key}: {e}")))?;
    updated.validate()?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => TrustflowConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = TrustflowConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

/// Export configuration as environment variables.
pub fn cmd_config_export(config: &TrustflowConfig, docker_env: bool) -> Result<()> {
    for (key, value) in config.to_env_vars() {
        if docker_env {
            println!("--env {key}={value}");
        } else {
            println!("{key}={value}");
        }
    }
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let mut parts: Vec<&str> = key.split('.').collect();
    let last = match parts.pop() {
        Some(last) if !last.is_empty() => last,
        _ => return Err(Error::config("Empty key path")),
    };

    let mut current = root;
    for part in parts {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => toml::Value::Boolean(true),
        "false" => toml::Value::Boolean(false),
        _ => match s.parse::<i64>() {
            Ok(i) => toml::Value::Integer(i),
            Err(_) => toml::Value::String(s.to_string()),
        },
    }
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

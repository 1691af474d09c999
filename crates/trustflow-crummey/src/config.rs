//! Crummey notice settings.

use serde::{Deserialize, Serialize};
use trustflow_core::{Error, Result};

use crate::alerts::DEFAULT_ALERT_WINDOW_DAYS;
use crate::allocation::DEFAULT_LAPSE_PERIOD_DAYS;

/// Settings for notice allocation and deadline alerts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrummeyConfig {
    /// Calendar days a withdrawal right stays open.
    #[serde(default = "default_lapse_period_days")]
    pub lapse_period_days: u32,

    /// How far ahead deadline alerts look.
    #[serde(default = "default_alert_window_days")]
    pub alert_window_days: u32,
}

fn default_lapse_period_days() -> u32 {
    DEFAULT_LAPSE_PERIOD_DAYS
}

fn default_alert_window_days() -> u32 {
    DEFAULT_ALERT_WINDOW_DAYS
}

impl Default for CrummeyConfig {
    fn default() -> Self {
        Self {
            lapse_period_days: default_lapse_period_days(),
            alert_window_days: default_alert_window_days(),
        }
    }
}

impl CrummeyConfig {
    /// Rejects settings the operations would refuse at run time.
    pub fn validate(&self) -> Result<()> {
        if self.alert_window_days == 0 {
            return Err(Error::config("crummey.alert_window_days must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_crummey_config_default() {
        let config = CrummeyConfig::default();
        assert_eq!(config.lapse_period_days, 30);
        assert_eq!(config.alert_window_days, 7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_crummey_config_partial_deserialization() {
        let config: CrummeyConfig = serde_json::from_str(r#"{"lapse_period_days": 45}"#).unwrap();
        assert_eq!(config.lapse_period_days, 45);
        assert_eq!(config.alert_window_days, 7);
    }

    #[test]
    fn test_crummey_config_zero_window_invalid() {
        let config = CrummeyConfig {
            alert_window_days: 0,
            ..CrummeyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

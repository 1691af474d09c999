//! Premium tracking settings.

use serde::{Deserialize, Serialize};
use trustflow_core::{Error, Result};

use crate::sufficiency::DEFAULT_LOOKAHEAD_DAYS;

/// Settings for funds-sufficiency checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumConfig {
    /// Days ahead to count premiums as upcoming.
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
}

fn default_lookahead_days() -> u32 {
    DEFAULT_LOOKAHEAD_DAYS
}

impl Default for PremiumConfig {
    fn default() -> Self {
        Self {
            lookahead_days: default_lookahead_days(),
        }
    }
}

impl PremiumConfig {
    /// Rejects settings the sufficiency check would refuse.
    pub fn validate(&self) -> Result<()> {
        if self.lookahead_days == 0 {
            return Err(Error::config("premium.lookahead_days must be positive"));
        }
        Ok(())
    }
}

//! Gift-tax configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::exclusion::{AnnualExclusionTable, ExclusionEntry, FallbackPolicy};

/// Exclusion table and fallback policy as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftTaxConfig {
    /// What to do when a tax year is missing from `exclusions`
    #[serde(default)]
    pub fallback: FallbackPolicy,

    /// Per-year exclusion amounts
    #[serde(default = "default_exclusions")]
    pub exclusions: Vec<ExclusionEntry>,
}

fn default_exclusions() -> Vec<ExclusionEntry> {
    AnnualExclusionTable::irs_default().entries()
}

impl Default for GiftTaxConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            exclusions: default_exclusions(),
        }
    }
}

impl GiftTaxConfig {
    /// Builds the immutable table handed to the aggregator.
    pub fn build_table(&self) -> Result<AnnualExclusionTable> {
        AnnualExclusionTable::new(self.exclusions.iter().copied(), self.fallback)
    }
}

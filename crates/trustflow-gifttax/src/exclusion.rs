//! Annual gift-tax exclusion limits.
//!
//! The table maps a tax year to the per-donor, per-recipient amount excluded
//! from gift tax. It is an immutable value handed to whoever needs it; there
//! is no process-wide table, so tests and callers can supply their own years.
//!
//! A year missing from the table is not an error. The lookup falls back
//! according to the table's [`FallbackPolicy`] and says so in the returned
//! [`ExclusionLimit`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use trustflow_core::Money;

use crate::error::{Error, Result};

/// Year used when a lookup misses and no other policy is configured.
pub const DEFAULT_FALLBACK_YEAR: i32 = 2024;

/// IRS annual exclusion amounts shipped with TrustFlow.
///
/// 2026 is a projection and should be revisited when the IRS publishes it.
pub const IRS_ANNUAL_EXCLUSIONS: [(i32, i64); 4] =
    [(2023, 17_000), (2024, 18_000), (2025, 19_000), (2026, 19_000)];

/// What to answer for a year the table does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Use the limit for a fixed year.
    Year(i32),
    /// Use the limit for the latest year in the table.
    MostRecent,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Year(DEFAULT_FALLBACK_YEAR)
    }
}

/// Where a resolved limit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionSource {
    /// The requested year is in the table.
    Exact,
    /// The requested year was missing; `used` supplied the amount.
    Fallback {
        /// Year that was asked for
        requested: i32,
        /// Year whose limit was returned
        used: i32,
    },
}

impl ExclusionSource {
    /// Returns `true` when the lookup missed.
    pub fn is_fallback(&self) -> bool {
        matches!(self, ExclusionSource::Fallback { .. })
    }
}

/// A resolved exclusion limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionLimit {
    /// Year that was asked for
    pub tax_year: i32,
    /// Excluded amount per donor per recipient
    pub amount: Money,
    /// Whether the amount is exact or a fallback
    pub source: ExclusionSource,
}

/// One row of an exclusion table, as stored in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionEntry {
    /// Tax year
    pub year: i32,
    /// Excluded amount for that year
    pub amount: Money,
}

/// Immutable year → limit mapping with a fallback policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnualExclusionTable {
    limits: BTreeMap<i32, Money>,
    fallback_year: i32,
    fallback: FallbackPolicy,
}

impl AnnualExclusionTable {
    /// Builds a table, validating it up front.
    ///
    /// Rejects an empty table, duplicate years, non-positive amounts, and a
    /// fixed fallback year the table does not contain, so that
    /// [`resolve`](Self::resolve) can never fail.
    pub fn new<I>(entries: I, fallback: FallbackPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = ExclusionEntry>,
    {
        let mut limits = BTreeMap::new();
        for entry in entries {
            if !entry.amount.is_positive() {
                return Err(Error::validation(format!(
                    "exclusion for {} must be positive (got {})",
                    entry.year, entry.amount
                )));
            }
            if limits.insert(entry.year, entry.amount).is_some() {
                return Err(Error::validation(format!(
                    "exclusion year {} listed more than once",
                    entry.year
                )));
            }
        }

        let fallback_year = match fallback {
            FallbackPolicy::Year(year) if limits.contains_key(&year) => year,
            FallbackPolicy::Year(year) => {
                return Err(Error::validation(format!(
                    "fallback year {year} is not in the exclusion table"
                )));
            }
            FallbackPolicy::MostRecent => match limits.keys().next_back() {
                Some(year) => *year,
                None => return Err(Error::validation("exclusion table is empty")),
            },
        };

        Ok(Self {
            limits,
            fallback_year,
            fallback,
        })
    }

    /// The IRS amounts in [`IRS_ANNUAL_EXCLUSIONS`] with a fallback to 2024.
    pub fn irs_default() -> Self {
        Self {
            limits: IRS_ANNUAL_EXCLUSIONS
                .iter()
                .map(|(year, dollars)| (*year, Money::from_dollars(*dollars)))
                .collect(),
            fallback_year: DEFAULT_FALLBACK_YEAR,
            fallback: FallbackPolicy::default(),
        }
    }

    /// Resolves the limit for `year`, falling back when it is missing.
    pub fn resolve(&self, year: i32) -> ExclusionLimit {
        if let Some(amount) = self.limits.get(&year) {
            return ExclusionLimit {
                tax_year: year,
                amount: *amount,
                source: ExclusionSource::Exact,
            };
        }

        log::debug!(
            "No exclusion listed for {year}; using {} ({:?})",
            self.fallback_year,
            self.fallback
        );
        ExclusionLimit {
            tax_year: year,
            amount: self
                .limits
                .get(&self.fallback_year)
                .copied()
                .unwrap_or(Money::ZERO),
            source: ExclusionSource::Fallback {
                requested: year,
                used: self.fallback_year,
            },
        }
    }

    /// Excluded amount for `year`.
    ///
    /// # Examples
    ///
    /// ```
    /// use trustflow_core::Money;
    /// use trustflow_gifttax::AnnualExclusionTable;
    ///
    /// let table = AnnualExclusionTable::irs_default();
    /// assert_eq!(table.lookup(2025), Money::from_dollars(19_000));
    /// assert_eq!(table.lookup(2030), table.lookup(2024));
    /// ```
    pub fn lookup(&self, year: i32) -> Money {
        self.resolve(year).amount
    }

    /// The configured fallback policy.
    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Table rows in year order.
    pub fn entries(&self) -> Vec<ExclusionEntry> {
        self.limits
            .iter()
            .map(|(year, amount)| ExclusionEntry {
                year: *year,
                amount: *amount,
            })
            .collect()
    }
}

impl Default for AnnualExclusionTable {
    fn default() -> Self {
        Self::irs_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

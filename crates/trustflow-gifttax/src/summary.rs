//! Per-donor, per-trust, per-year gift totals checked against the exclusion.
//!
//! [`GiftTaxAggregator`] owns an [`AnnualExclusionTable`] and turns a gift
//! history into a [`GiftTaxSummary`]. Rows are keyed by
//! `(donor_name, trust_id, tax_year)` and sorted by donor name ignoring case,
//! then by the exact name, trust and year, so the same gifts in any order give
//! the same summary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use trustflow_core::{Gift, Money, TrustId};

use crate::error::Result;
use crate::exclusion::{AnnualExclusionTable, ExclusionSource};

/// Restricts which gifts a summary covers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryFilter {
    /// Only gifts dated within this calendar year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Case-insensitive substring of the donor name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<String>,

    /// Only gifts to this trust
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_id: Option<TrustId>,
}

impl SummaryFilter {
    /// Filter covering a single tax year.
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    /// Restricts to donors whose name contains `donor`.
    pub fn with_donor(mut self, donor: impl Into<String>) -> Self {
        self.donor = Some(donor.into());
        self
    }

    /// Restricts to one trust.
    pub fn with_trust(mut self, trust_id: TrustId) -> Self {
        self.trust_id = Some(trust_id);
        self
    }

    /// Returns `true` if `gift` passes every configured criterion.
    pub fn matches(&self, gift: &Gift) -> bool {
        if self.year.is_some_and(|year| gift.tax_year() != year) {
            return false;
        }
        if self.trust_id.is_some_and(|id| gift.trust_id != id) {
            return false;
        }
        match self.donor.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => gift
                .donor_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        }
    }
}

/// Aggregate for one donor, trust and tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftTaxSummaryRow {
    /// Donor name as recorded on the gifts
    pub donor_name: String,
    /// Smallest non-empty donor email seen in the group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,
    /// Trust receiving the gifts
    pub trust_id: TrustId,
    /// Calendar year of the gifts
    pub tax_year: i32,
    /// Sum of gift amounts
    pub total: Money,
    /// Number of gifts in the group
    pub gift_count: usize,
    /// Annual exclusion for `tax_year`
    pub exclusion: Money,
    /// Whether `exclusion` was listed or came from the fallback
    pub exclusion_source: ExclusionSource,
    /// `total > exclusion`
    pub exceeds_exclusion: bool,
    /// `max(0, total - exclusion)`
    pub excess: Money,
}

/// Figures across all rows of a summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Distinct donor names
    pub donor_count: usize,
    /// Distinct trusts
    pub trust_count: usize,
    /// Sum of all gift amounts
    pub total_gifts: Money,
    /// Number of gifts summarized
    pub gift_count: usize,
    /// Rows over their exclusion
    pub rows_exceeding: usize,
    /// Sum of all row excesses
    pub total_excess: Money,
}

impl SummaryTotals {
    fn from_rows(rows: &[GiftTaxSummaryRow]) -> trustflow_core::Result<Self> {
        let donors: BTreeSet<&str> = rows.iter().map(|r| r.donor_name.as_str()).collect();
        let trusts: BTreeSet<TrustId> = rows.iter().map(|r| r.trust_id).collect();
        Ok(Self {
            donor_count: donors.len(),
            trust_count: trusts.len(),
            total_gifts: Money::checked_sum(rows.iter().map(|r| r.total))?,
            gift_count: rows.iter().map(|r| r.gift_count).sum(),
            rows_exceeding: rows.iter().filter(|r| r.exceeds_exclusion).count(),
            total_excess: Money::checked_sum(rows.iter().map(|r| r.excess))?,
        })
    }
}

/// Result of [`GiftTaxAggregator::summarize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftTaxSummary {
    /// Year filter the summary was built with, if any
    pub tax_year: Option<i32>,
    /// Rows sorted by donor name (case-insensitive), trust, then year
    pub rows: Vec<GiftTaxSummaryRow>,
    /// Figures across all rows
    pub totals: SummaryTotals,
}

impl GiftTaxSummary {
    /// Returns `true` when no gift matched the filter.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows requiring a gift-tax return (Form 709).
    pub fn exceeding(&self) -> impl Iterator<Item = &GiftTaxSummaryRow> {
        self.rows.iter().filter(|r| r.exceeds_exclusion)
    }
}

#[derive(Default)]
struct Group {
    total: Money,
    count: usize,
    email: Option<String>,
}

impl Group {
    fn add(&mut self, gift: &Gift) -> trustflow_core::Result<()> {
        self.total = self.total.checked_add(gift.amount)?;
        self.count += 1;
        let email = gift
            .donor_email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty());
        if let Some(email) = email
            && self.email.as_deref().is_none_or(|current| email < current)
        {
            self.email = Some(email.to_string());
        }
        Ok(())
    }
}

/// Summarizes gift histories against an injected exclusion table.
#[derive(Debug, Clone, Default)]
pub struct GiftTaxAggregator {
    table: AnnualExclusionTable,
}

impl GiftTaxAggregator {
    /// Creates an aggregator using `table` for every lookup.
    pub fn new(table: AnnualExclusionTable) -> Self {
        Self { table }
    }

    /// The exclusion table in use.
    pub fn table(&self) -> &AnnualExclusionTable {
        &self.table
    }

    /// Groups `gifts` matching `filter` and compares each group to its
    /// year's exclusion.
    ///
    /// Every gift is validated first, including those the filter would drop;
    /// a malformed gift fails the whole call, as does a total too large to
    /// represent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use trustflow_core::{Gift, Money, TrustId};
    /// use trustflow_gifttax::{GiftTaxAggregator, SummaryFilter};
    ///
    /// let trust = TrustId::new();
    /// let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    /// let gifts: Vec<Gift> = (0..3)
    ///     .map(|_| Gift::new(trust, "Mark Johnson", Money::from_dollars(10_000), day).unwrap())
    ///     .collect();
    ///
    /// let summary = GiftTaxAggregator::default()
    ///     .summarize(&gifts, &SummaryFilter::for_year(2025))
    ///     .unwrap();
    /// let row = &summary.rows[0];
    /// assert_eq!(row.total, Money::from_dollars(30_000));
    /// assert!(row.exceeds_exclusion);
    /// assert_eq!(row.excess, Money::from_dollars(11_000));
    /// ```
    pub fn summarize(&self, gifts: &[Gift], filter: &SummaryFilter) -> Result<GiftTaxSummary> {
        for gift in gifts {
            gift.validate()?;
        }

        let mut groups: BTreeMap<(String, TrustId, i32), Group> = BTreeMap::new();
        for gift in gifts.iter().filter(|g| filter.matches(g)) {
            let key = (gift.donor_name.trim().to_string(), gift.trust_id, gift.tax_year());
            groups.entry(key).or_default().add(gift)?;
        }

        let mut rows: Vec<GiftTaxSummaryRow> = groups
            .into_iter()
            .map(|((donor_name, trust_id, tax_year), group)| {
                let limit = self.table.resolve(tax_year);
                GiftTaxSummaryRow {
                    donor_name,
                    donor_email: group.email,
                    trust_id,
                    tax_year,
                    total: group.total,
                    gift_count: group.count,
                    exclusion: limit.amount,
                    exclusion_source: limit.source,
                    exceeds_exclusion: group.total > limit.amount,
                    excess: group.total.excess_over(limit.amount),
                }
            })
            .collect();
        rows.sort_by_cached_key(|r| (r.donor_name.to_lowercase(), r.donor_name.clone()));

        let totals = SummaryTotals::from_rows(&rows)?;
        log::info!(
            "Summarized {} gift(s) into {} row(s); {} over the exclusion",
            totals.gift_count,
            rows.len(),
            totals.rows_exceeding
        );

        Ok(GiftTaxSummary {
            tax_year: filter.year,
            rows,
            totals,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Trust beneficiaries and their withdrawal shares.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{BeneficiaryId, Percentage, TrustId};

/// A person holding a Crummey withdrawal right over gifts to a trust.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficiary {
    /// Unique identifier
    pub id: BeneficiaryId,

    /// Trust this beneficiary belongs to
    pub trust_id: TrustId,

    /// Display name used on notices
    pub name: String,

    /// Delivery address for notices, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Share of every gift to the trust this beneficiary may withdraw
    pub withdrawal_percentage: Percentage,
}

impl Beneficiary {
    /// Creates a beneficiary with a fresh id and no email.
    pub fn new(
        trust_id: TrustId,
        name: impl Into<String>,
        withdrawal_percentage: Percentage,
    ) -> Self {
        Self {
            id: BeneficiaryId::new(),
            trust_id,
            name: name.into(),
            email: None,
            withdrawal_percentage,
        }
    }

    /// Sets the beneficiary's email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets a specific identifier.
    pub fn with_id(mut self, id: BeneficiaryId) -> Self {
        self.id = id;
        self
    }
}

/// Splits 100% evenly across `count` beneficiaries.
///
/// Shares are rounded down to two decimal places and the remainder goes to the
/// first share, so the result always totals exactly 100.
///
/// # Examples
///
/// ```
/// use trustflow_core::types::even_shares;
///
/// let shares = even_shares(3).unwrap();
/// let rendered: Vec<String> = shares.iter().map(|p| p.to_string()).collect();
/// assert_eq!(rendered, ["33.34%", "33.33%", "33.33%"]);
/// ```
pub fn even_shares(count: usize) -> Result<Vec<Percentage>> {
    if count == 0 {
        return Err(Error::validation_field(
            "beneficiaries",
            "cannot split shares across zero beneficiaries",
        ));
    }
    let n = Decimal::from(count as u64);
    let base = (Decimal::ONE_HUNDRED / n).round_dp_with_strategy(2, RoundingStrategy::ToZero);
    let remainder = Decimal::ONE_HUNDRED - base * n;

    let mut shares = Vec::with_capacity(count);
    shares.push(Percentage::new(base + remainder)?);
    for _ in 1..count {
        shares.push(Percentage::new(base)?);
    }
    Ok(shares)
}

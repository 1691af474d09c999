//! Recorded donor contributions to a trust.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{GiftId, Money, TrustId};

/// Form in which a gift was contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftType {
    /// Cash or wire transfer.
    #[default]
    Cash,
    /// Personal or cashier's check.
    Check,
    /// Marketable securities.
    Securities,
    /// Anything else.
    Other,
}

/// A donor contribution to a trust.
///
/// Gifts are immutable once recorded; corrections are made by replacing the
/// record, not by editing it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gift {
    /// Unique identifier
    pub id: GiftId,

    /// Trust receiving the gift
    pub trust_id: TrustId,

    /// Name of the donor
    pub donor_name: String,

    /// Donor contact address, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,

    /// Amount contributed
    pub amount: Money,

    /// Date the gift was recorded
    pub date: NaiveDate,

    /// Form of the contribution
    #[serde(default)]
    pub gift_type: GiftType,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Gift {
    /// Creates a validated cash gift with a fresh id.
    pub fn new(
        trust_id: TrustId,
        donor_name: impl Into<String>,
        amount: Money,
        date: NaiveDate,
    ) -> Result<Self> {
        let gift = Self {
            id: GiftId::new(),
            trust_id,
            donor_name: donor_name.into(),
            donor_email: None,
            amount,
            date,
            gift_type: GiftType::default(),
            description: None,
        };
        gift.validate()?;
        Ok(gift)
    }

    /// Sets a specific identifier.
    pub fn with_id(mut self, id: GiftId) -> Self {
        self.id = id;
        self
    }

    /// Sets the donor's email address.
    pub fn with_donor_email(mut self, email: impl Into<String>) -> Self {
        self.donor_email = Some(email.into());
        self
    }

    /// Sets the gift type.
    pub fn with_gift_type(mut self, gift_type: GiftType) -> Self {
        self.gift_type = gift_type;
        self
    }

    /// Checks the record's shape.
    ///
    /// Deserialized gifts bypass [`Gift::new`], so every consumer calls this
    /// before computing with one.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(Error::validation_field(
                "amount",
                format!("gift amount must be positive (got {})", self.amount),
            ));
        }
        if self.donor_name.trim().is_empty() {
            return Err(Error::validation_field(
                "donor_name",
                "donor name must not be empty",
            ));
        }
        Ok(())
    }

    /// Calendar year the gift counts toward.
    pub fn tax_year(&self) -> i32 {
        self.date.year()
    }
}

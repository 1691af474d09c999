//! Opaque identifier types for trusts, beneficiaries, gifts, policies and
//! premium payments.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from a UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Converts to the inner UUID.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id! {
    /// Identifier of an irrevocable life insurance trust.
    TrustId
}

uuid_id! {
    /// Identifier of a trust beneficiary.
    BeneficiaryId
}

uuid_id! {
    /// Identifier of a recorded gift.
    GiftId
}

uuid_id! {
    /// Identifier of a life insurance policy held by a trust.
    PolicyId
}

uuid_id! {
    /// Identifier of a recorded premium payment.
    PaymentId
}

/// Identity of a withdrawal notice.
///
/// Exactly one notice exists per (gift, beneficiary) pair, so the pair itself
/// is the key. Deriving it this way keeps allocation deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NoticeKey {
    /// Gift the notice was derived from
    pub gift_id: GiftId,
    /// Beneficiary holding the withdrawal right
    pub beneficiary_id: BeneficiaryId,
}

impl NoticeKey {
    /// Creates a key for the given gift and beneficiary.
    pub fn new(gift_id: GiftId, beneficiary_id: BeneficiaryId) -> Self {
        Self {
            gift_id,
            beneficiary_id,
        }
    }
}

impl fmt::Display for NoticeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.gift_id, self.beneficiary_id)
    }
}

//! Data model for ILIT gift administration.

mod beneficiary;
mod gift;
mod ids;
mod money;
mod notice;
mod premium;
mod proptests;

pub use beneficiary::{Beneficiary, even_shares};
pub use gift::{Gift, GiftType};
pub use ids::{BeneficiaryId, GiftId, NoticeKey, PaymentId, PolicyId, TrustId};
pub use money::{MINOR_UNIT_SCALE, Money, Percentage};
pub use notice::{NoticeStatus, WithdrawalNotice};
pub use premium::{InsurancePolicy, PaymentStatus, PremiumFrequency, PremiumPayment};

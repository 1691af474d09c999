#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! TrustFlow Core Library
//!
//! Data model, fixed-point money arithmetic, and the error taxonomy shared by
//! every TrustFlow crate. Has no internal TrustFlow dependencies.

pub mod error;
pub mod types;

// Re-exports for convenience
pub use error::{Error, Result};
pub use types::{
    Beneficiary, BeneficiaryId, Gift, GiftId, GiftType, InsurancePolicy, Money, NoticeKey,
    NoticeStatus, PaymentId, PaymentStatus, Percentage, PolicyId, PremiumFrequency,
    PremiumPayment, TrustId, WithdrawalNotice,
};

//! Beneficiaries added after a gift do not receive notices for it.

use trustflow_core::{Beneficiary, Percentage};
use trustflow_crummey::{AllocationWarning, allocate, validate_beneficiary_set};

use crate::common::{TrustFixture, date};

#[test]
fn test_snapshot_at_allocation_time_is_final() {
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(10_000, date(2025, 3, 1));

    let first = allocate(&gift, &trust.beneficiaries(), 30).unwrap();
    assert_eq!(first.notices.len(), 2);

    // The trust later re-splits across three beneficiaries.
    let mut alice = trust.alice.clone();
    alice.withdrawal_percentage = Percentage::whole(50).unwrap();
    let mut bob = trust.bob.clone();
    bob.withdrawal_percentage = Percentage::whole(30).unwrap();
    let carol = Beneficiary::new(trust.trust_id, "Carol Johnson", Percentage::whole(20).unwrap());
    let updated = vec![alice, bob, carol.clone()];
    validate_beneficiary_set(&updated).unwrap();

    // The notices already issued for the earlier gift are unchanged, and Carol has none.
    assert!(first.notices.iter().all(|n| n.beneficiary_id != carol.id));

    // A new gift picks up the new snapshot.
    let later = trust.gift(10_000, date(2025, 9, 1));
    let second = allocate(&later, &updated, 30).unwrap();
    assert_eq!(second.notices.len(), 3);
    assert!(second.notices.iter().any(|n| n.beneficiary_id == carol.id));
}

#[test]
fn test_gift_to_trust_without_beneficiaries_still_records() {
    let trust = TrustFixture::sixty_forty();
    let gift = trust.gift(5_000, date(2025, 3, 1));
    let allocation = allocate(&gift, &[], 30).unwrap();
    assert!(allocation.notices.is_empty());
    assert_eq!(allocation.warnings, vec![AllocationWarning::NoBeneficiaries]);
}

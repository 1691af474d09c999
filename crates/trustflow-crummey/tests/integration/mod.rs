mod gift_to_expiry;
mod late_beneficiary;

//! Integration test modules.

mod funding;
mod payment_history;

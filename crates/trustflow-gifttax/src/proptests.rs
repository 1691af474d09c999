//! Property-based tests for the gift-tax aggregator.

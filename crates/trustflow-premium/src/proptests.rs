//! Property-based tests for premium tracking.

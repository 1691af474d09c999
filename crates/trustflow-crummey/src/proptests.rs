//! Property-based tests for allocation and the notice sweep.

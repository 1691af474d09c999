//! Integration test modules.

mod annual_report;
mod configured_table;

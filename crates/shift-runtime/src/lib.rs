//! Runtime orchestration layer for Shiftlog.
//!
//! Re-reads the raw log source on an interval, rebuilds the report and
//! publishes snapshots to whoever consumes them.

pub mod orchestrator;

pub use shift_core as core;
pub use shift_data as data;

//! Ingestion and transformation layer for Shiftlog.
//!
//! Responsible for locating and reading raw shift logs, decoding their
//! semicolon-delimited lines into typed records, and reorganising those
//! records into the per-item Report of graphs, standard tables and pivot
//! tables.

pub mod builder;
pub mod decoder;
pub mod pivot;
pub mod reader;
pub mod report;

pub use shift_core as core;

//! Core data model for Shiftlog.
//!
//! Defines the decoded record types, the Report shapes handed to downstream
//! consumers (graphs, standard tables, pivot tables), the chronological
//! ordering rule for shift time ranges, the shared error type and the CLI
//! settings.

pub mod error;
pub mod models;
pub mod settings;
pub mod time_order;

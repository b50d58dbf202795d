//! Top-level parse entry points.
//!
//! [`build_report`] is the pure transformation: one raw log string in, one
//! [`Report`] out, no I/O, no errors. [`parse_report`] wraps it with run
//! metadata for logging and the watch loop.

use chrono::Utc;
use shift_core::models::Report;
use tracing::debug;

use crate::builder::ReportBuilder;
use crate::decoder::decode_records;

/// Bookkeeping for one parse run.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    /// RFC 3339 timestamp of when the parse ran.
    pub generated_at: String,
    /// Non-blank lines in the raw text.
    pub lines_total: usize,
    /// Lines that decoded into records.
    pub records_decoded: usize,
    /// Distinct items in the report.
    pub items: usize,
    /// Wall-clock duration of decode plus assembly.
    pub parse_time_seconds: f64,
}

/// A report together with its run metadata.
#[derive(Debug, Clone)]
pub struct ReportOutcome {
    pub report: Report,
    pub metadata: ReportMetadata,
}

/// Transform the complete raw log text into a [`Report`].
///
/// Pure and synchronous: the same input always yields a structurally
/// identical report, malformed content is silently dropped, and entirely
/// malformed input yields an empty report.
pub fn build_report(raw: &str) -> Report {
    let mut builder = ReportBuilder::new();
    for record in decode_records(raw) {
        builder.push(record);
    }
    builder.finish()
}

/// Run [`build_report`] and capture run metadata.
pub fn parse_report(raw: &str) -> ReportOutcome {
    let started = std::time::Instant::now();

    let lines_total = raw.lines().filter(|l| !l.trim().is_empty()).count();
    let records = decode_records(raw);
    let records_decoded = records.len();

    let mut builder = ReportBuilder::new();
    for record in records {
        builder.push(record);
    }
    let report = builder.finish();

    let metadata = ReportMetadata {
        generated_at: Utc::now().to_rfc3339(),
        lines_total,
        records_decoded,
        items: report.len(),
        parse_time_seconds: started.elapsed().as_secs_f64(),
    };

    debug!(
        "parsed {} of {} lines into {} items in {:.3}s",
        metadata.records_decoded, metadata.lines_total, metadata.items, metadata.parse_time_seconds
    );

    ReportOutcome { report, metadata }
}

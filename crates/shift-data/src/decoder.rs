//! Line decoder for the semicolon-delimited shift log.
//!
//! The wire format is one record per line, fields separated by `;` with no
//! escaping. The third field discriminates the record kind: `numero` for a
//! numeric sample, `tabla` for a table row. Decoding is best effort by
//! contract: any line that fails a structural or numeric check is dropped
//! silently, never surfaced as an error.

use shift_core::models::{RawRecord, RecordPayload};
use tracing::debug;

/// Field layout shared by both record kinds:
/// `timeRange;itemName;kind;...`.
const MIN_FIELDS: usize = 5;

/// Decode the complete raw log text into typed records.
///
/// Blank lines are skipped; malformed lines are discarded with a debug log
/// and nothing else.
pub fn decode_records(raw: &str) -> Vec<RawRecord> {
    raw.lines().filter_map(decode_line).collect()
}

/// Decode one line, or `None` when it fails any structural check.
fn decode_line(line: &str) -> Option<RawRecord> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let fields: Vec<&str> = line.split(';').collect();
    if fields.len() < MIN_FIELDS {
        debug!("discarding short line ({} fields): {}", fields.len(), line);
        return None;
    }

    let time_range = fields[0].to_string();
    let item_name = fields[1].to_string();

    match fields[2] {
        "numero" => {
            // A numeric sample is exactly five fields; anything longer is
            // a malformed line, not extra data.
            if fields.len() != MIN_FIELDS {
                debug!("discarding numeric line with {} fields: {}", fields.len(), line);
                return None;
            }
            let value = match parse_sample(fields[4]) {
                Some(v) => v,
                None => {
                    debug!("discarding numeric line with unparsable value: {}", line);
                    return None;
                }
            };
            Some(RawRecord {
                time_range,
                item_name,
                payload: RecordPayload::Numeric {
                    series_name: fields[3].to_string(),
                    value,
                },
            })
        }

        "tabla" => {
            // timeRange;item;tabla;tableName;keyIndex;col... → at least one column.
            if fields.len() < 6 {
                debug!("discarding table line without columns: {}", line);
                return None;
            }
            let key_column_index = match fields[4].trim().parse::<i64>() {
                Ok(k) if k >= 1 => k as usize,
                _ => {
                    debug!("discarding table line with bad key index {:?}: {}", fields[4], line);
                    return None;
                }
            };
            Some(RawRecord {
                time_range,
                item_name,
                payload: RecordPayload::Table {
                    table_name: fields[3].to_string(),
                    key_column_index,
                    columns: fields[5..].iter().map(|f| f.to_string()).collect(),
                },
            })
        }

        other => {
            debug!("discarding line with unknown record kind {:?}", other);
            None
        }
    }
}

/// Parse a numeric sample value. Non-finite results count as unparsable so
/// a literal `NaN` or `inf` in the log never reaches a graph.
fn parse_sample(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

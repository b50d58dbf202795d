use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Decoded records ───────────────────────────────────────────────────────────

/// Kind-specific payload of a decoded log line.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordPayload {
    /// A single numeric sample belonging to a named series.
    Numeric {
        /// Series the sample belongs to (one graph per series).
        series_name: String,
        /// Sample value. Lines with an unparsable value are never decoded.
        value: f64,
    },
    /// One raw row of a named table.
    Table {
        /// Table the row belongs to.
        table_name: String,
        /// 1-based index of the pivot grouping column, as declared on the
        /// wire. Always >= 1 for a decoded record.
        key_column_index: usize,
        /// Cell values in wire order. The last cell is the value column.
        columns: Vec<String>,
    },
}

/// One successfully decoded input line.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Time-bucket label, e.g. `"14:00-15:00"`. Treated as opaque except for
    /// the leading hour used by [`crate::time_order::hour_rank`].
    pub time_range: String,
    /// Name of the item this measurement belongs to.
    pub item_name: String,
    pub payload: RecordPayload,
}

// ── Report shapes ─────────────────────────────────────────────────────────────

/// A time series for one (item, series) pair.
///
/// `labels` and `values` are parallel and equally long, ordered by
/// [`crate::time_order::hour_rank`]. Repeated time ranges are kept as
/// separate points; nothing is merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// One raw row of a standard table, exactly as it appeared in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub time_range: String,
    pub columns: Vec<String>,
}

/// A standard table: rows in encounter order, no sorting, no aggregation.
pub type StandardTable = Vec<TableRow>;

/// A cross-tabulated table: one row per distinct key value, one column per
/// passthrough column, then the total, then one column per time range.
///
/// Invariant: every row has exactly `headers.len()` cells. All cells are
/// rendered as strings via [`format_cell`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the report holds for one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemReport {
    /// Series name → graph.
    pub graphs: BTreeMap<String, Graph>,
    /// Table name → raw rows.
    pub standard_tables: BTreeMap<String, StandardTable>,
    /// Table name → pivot. Tables whose key index is geometrically invalid
    /// are absent here while still present in `standard_tables`.
    pub pivot_tables: BTreeMap<String, PivotTable>,
}

impl ItemReport {
    /// True when none of the three categories has any content.
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty() && self.standard_tables.is_empty() && self.pivot_tables.is_empty()
    }
}

/// The complete report: item name → per-item content.
///
/// `BTreeMap` keeps iteration and serialisation order deterministic.
pub type Report = BTreeMap<String, ItemReport>;

// ── Cell formatting ───────────────────────────────────────────────────────────

/// Render a numeric pivot cell as a string.
///
/// Integral values print without a decimal point (`8.0` → `"8"`), fractional
/// values keep their shortest exact form (`7.5` → `"7.5"`).
pub fn format_cell(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_cell ───────────────────────────────────────────────────────

    #[test]
    fn test_format_cell_integral() {
        assert_eq!(format_cell(8.0), "8");
        assert_eq!(format_cell(0.0), "0");
        assert_eq!(format_cell(-3.0), "-3");
    }

    #[test]
    fn test_format_cell_fractional() {
        assert_eq!(format_cell(7.5), "7.5");
        assert_eq!(format_cell(0.25), "0.25");
    }

    // ── ItemReport ────────────────────────────────────────────────────────

    #[test]
    fn test_item_report_default_is_empty() {
        assert!(ItemReport::default().is_empty());
    }

    #[test]
    fn test_item_report_with_graph_not_empty() {
        let mut item = ItemReport::default();
        item.graphs.insert("Throughput".to_string(), Graph::default());
        assert!(!item.is_empty());
    }

    // ── serde round trip ──────────────────────────────────────────────────

    #[test]
    fn test_report_serialises_with_stable_key_order() {
        let mut report = Report::new();
        report.insert("Zeta".to_string(), ItemReport::default());
        report.insert("Alpha".to_string(), ItemReport::default());

        let json = serde_json::to_string(&report).unwrap();
        let alpha = json.find("Alpha").unwrap();
        let zeta = json.find("Zeta").unwrap();
        assert!(alpha < zeta);
    }

    #[test]
    fn test_graph_serde_round_trip() {
        let graph = Graph {
            labels: vec!["08:00-09:00".to_string()],
            values: vec![10.0],
        };
        let json = serde_json::to_string(&graph).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(back, graph);
    }
}

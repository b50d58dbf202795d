//! Report assembly from decoded records.
//!
//! [`ReportBuilder`] owns the per-invocation accumulators: numeric samples
//! per (item, series) and raw table rows per (item, table). Accumulators
//! are private intermediate shapes, converted into the public [`Graph`] /
//! [`PivotTable`] forms once, when [`ReportBuilder::finish`] runs.

use std::collections::BTreeMap;

use shift_core::models::{Graph, ItemReport, RawRecord, RecordPayload, Report, TableRow};
use shift_core::time_order::hour_rank;

use crate::pivot;

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Unsorted (time range, value) pairs for one series, in encounter order.
#[derive(Debug, Default)]
struct SeriesAccumulator {
    points: Vec<(String, f64)>,
}

impl SeriesAccumulator {
    /// Sort the points chronologically and split into the parallel
    /// label/value form. The sort is stable, so equal hour ranks keep
    /// their encounter order; repeated time ranges stay as separate points.
    fn into_graph(mut self) -> Graph {
        self.points.sort_by_key(|(range, _)| hour_rank(range));
        let mut graph = Graph::default();
        for (range, value) in self.points {
            graph.labels.push(range);
            graph.values.push(value);
        }
        graph
    }
}

/// All rows collected for one (item, table) pair.
#[derive(Debug)]
pub struct CollectedTable {
    /// 1-based grouping column, captured from the first record seen for
    /// this table. Later records never overwrite it.
    pub key_column_index: usize,
    /// Raw rows in encounter order.
    pub rows: Vec<TableRow>,
}

// ── ReportBuilder ─────────────────────────────────────────────────────────────

/// Accumulates decoded records and assembles the final [`Report`].
///
/// Push records in log order, then call [`finish`](ReportBuilder::finish)
/// exactly once. Each builder is local to a single parse invocation.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    /// item → series → accumulated points.
    series: BTreeMap<String, BTreeMap<String, SeriesAccumulator>>,
    /// item → table → collected rows.
    tables: BTreeMap<String, BTreeMap<String, CollectedTable>>,
    /// Every item name seen in any record, so empty items still get an entry.
    items: std::collections::BTreeSet<String>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one decoded record into its accumulator.
    pub fn push(&mut self, record: RawRecord) {
        self.items.insert(record.item_name.clone());

        match record.payload {
            RecordPayload::Numeric { series_name, value } => {
                self.series
                    .entry(record.item_name)
                    .or_default()
                    .entry(series_name)
                    .or_default()
                    .points
                    .push((record.time_range, value));
            }
            RecordPayload::Table {
                table_name,
                key_column_index,
                columns,
            } => {
                self.tables
                    .entry(record.item_name)
                    .or_default()
                    .entry(table_name)
                    .or_insert_with(|| CollectedTable {
                        key_column_index,
                        rows: Vec::new(),
                    })
                    .rows
                    .push(TableRow {
                        time_range: record.time_range,
                        columns,
                    });
            }
        }
    }

    /// Convert all accumulators into the public report shape.
    pub fn finish(self) -> Report {
        let mut report = Report::new();
        for item in &self.items {
            report.insert(item.clone(), ItemReport::default());
        }

        for (item, series) in self.series {
            if let Some(entry) = report.get_mut(&item) {
                for (name, acc) in series {
                    entry.graphs.insert(name, acc.into_graph());
                }
            }
        }

        for (item, tables) in self.tables {
            if let Some(entry) = report.get_mut(&item) {
                for (name, collected) in tables {
                    // A geometrically invalid key index skips the pivot but
                    // never the standard table.
                    if let Some(pivot_table) = pivot::build_pivot(&collected) {
                        entry.pivot_tables.insert(name.clone(), pivot_table);
                    }
                    entry.standard_tables.insert(name, collected.rows);
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(range: &str, item: &str, series: &str, value: f64) -> RawRecord {
        RawRecord {
            time_range: range.to_string(),
            item_name: item.to_string(),
            payload: RecordPayload::Numeric {
                series_name: series.to_string(),
                value,
            },
        }
    }

    fn table(range: &str, item: &str, name: &str, key: usize, columns: &[&str]) -> RawRecord {
        RawRecord {
            time_range: range.to_string(),
            item_name: item.to_string(),
            payload: RecordPayload::Table {
                table_name: name.to_string(),
                key_column_index: key,
                columns: columns.iter().map(|c| c.to_string()).collect(),
            },
        }
    }

    fn build(records: Vec<RawRecord>) -> Report {
        let mut builder = ReportBuilder::new();
        for record in records {
            builder.push(record);
        }
        builder.finish()
    }

    // ── graphs ────────────────────────────────────────────────────────────

    #[test]
    fn test_graph_basic_two_points() {
        let report = build(vec![
            numeric("08:00-09:00", "Queue1", "Throughput", 10.0),
            numeric("09:00-10:00", "Queue1", "Throughput", 20.0),
        ]);
        let graph = &report["Queue1"].graphs["Throughput"];
        assert_eq!(graph.labels, vec!["08:00-09:00", "09:00-10:00"]);
        assert_eq!(graph.values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_graph_sorted_with_overnight_wrap() {
        let report = build(vec![
            numeric("08:00", "Q", "S", 1.0),
            numeric("07:00", "Q", "S", 2.0),
            numeric("23:00", "Q", "S", 3.0),
            numeric("05:00", "Q", "S", 4.0),
        ]);
        let graph = &report["Q"].graphs["S"];
        assert_eq!(graph.labels, vec!["07:00", "08:00", "23:00", "05:00"]);
        assert_eq!(graph.values, vec![2.0, 1.0, 3.0, 4.0]);
    }

    #[test]
    fn test_graph_duplicate_time_ranges_not_merged() {
        let report = build(vec![
            numeric("08:00", "Q", "S", 1.0),
            numeric("08:00", "Q", "S", 2.0),
        ]);
        let graph = &report["Q"].graphs["S"];
        assert_eq!(graph.labels, vec!["08:00", "08:00"]);
        // Stable sort: encounter order preserved for the tied rank.
        assert_eq!(graph.values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_graph_labels_values_parallel() {
        let report = build(vec![
            numeric("10:00", "Q", "S", 1.0),
            numeric("09:00", "Q", "S", 2.0),
            numeric("11:00", "Q", "S", 3.0),
        ]);
        let graph = &report["Q"].graphs["S"];
        assert_eq!(graph.labels.len(), graph.values.len());
    }

    #[test]
    fn test_separate_series_get_separate_graphs() {
        let report = build(vec![
            numeric("08:00", "Q", "Throughput", 1.0),
            numeric("08:00", "Q", "Errors", 2.0),
        ]);
        assert_eq!(report["Q"].graphs.len(), 2);
    }

    // ── table collection ──────────────────────────────────────────────────

    #[test]
    fn test_standard_table_preserves_encounter_order() {
        let report = build(vec![
            table("09:00", "Q", "T", 1, &["b", "2"]),
            table("08:00", "Q", "T", 1, &["a", "1"]),
        ]);
        let rows = &report["Q"].standard_tables["T"];
        assert_eq!(rows[0].time_range, "09:00");
        assert_eq!(rows[1].time_range, "08:00");
    }

    #[test]
    fn test_table_key_index_first_seen_wins() {
        // Second record declares key 9, which would invalidate the pivot;
        // the first record's key 1 must stick.
        let report = build(vec![
            table("08:00", "Q", "T", 1, &["a", "1"]),
            table("09:00", "Q", "T", 9, &["b", "2"]),
        ]);
        assert!(report["Q"].pivot_tables.contains_key("T"));
    }

    // ── assembly ──────────────────────────────────────────────────────────

    #[test]
    fn test_every_item_has_entry_with_all_categories() {
        let report = build(vec![numeric("08:00", "GraphOnly", "S", 1.0)]);
        let item = &report["GraphOnly"];
        assert_eq!(item.graphs.len(), 1);
        assert!(item.standard_tables.is_empty());
        assert!(item.pivot_tables.is_empty());
    }

    #[test]
    fn test_items_are_independent() {
        let report = build(vec![
            numeric("08:00", "A", "S", 1.0),
            table("08:00", "B", "T", 1, &["k", "1"]),
        ]);
        assert_eq!(report.len(), 2);
        assert!(report["A"].standard_tables.is_empty());
        assert!(report["B"].graphs.is_empty());
    }

    #[test]
    fn test_invalid_pivot_still_collected_as_standard_table() {
        // Key column 2 of a 2-column row points at the value column.
        let report = build(vec![table("08:00", "Q", "T", 2, &["a", "1"])]);
        assert!(report["Q"].standard_tables.contains_key("T"));
        assert!(!report["Q"].pivot_tables.contains_key("T"));
    }

    #[test]
    fn test_empty_builder_produces_empty_report() {
        assert!(build(vec![]).is_empty());
    }
}

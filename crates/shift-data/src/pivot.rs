//! Pivot engine: cross-tabulates collected table rows.
//!
//! Rows are grouped on the table's declared key column; the last column is
//! always the value column. Each output row carries the key's passthrough
//! cells, the summed total, and one summed cell per distinct time range,
//! chronologically ordered. Everything is rendered as strings.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use shift_core::models::{format_cell, PivotTable, TableRow};
use shift_core::time_order::hour_rank;

use crate::builder::CollectedTable;

/// Running sums and first-seen passthrough cells for one key value.
#[derive(Debug)]
struct KeyAccumulator {
    /// Cells left of the value column, minus the key column, taken from the
    /// first row seen for this key in their original relative order. Later
    /// rows never update these, even when they disagree.
    passthrough: Vec<String>,
    /// Sum of the value column across every row for this key.
    total: f64,
    /// Sum of the value column per (key, time range) pair.
    per_range: HashMap<String, f64>,
}

impl KeyAccumulator {
    /// Capture the first-seen passthrough cells for a key.
    ///
    /// Passthrough width is fixed by the table, not by the row: exactly the
    /// cells left of the value column minus the key column. Rows wider than
    /// the table contribute nothing beyond that width; short rows pad with
    /// empty cells. This keeps every output row as long as the headers.
    fn first_seen(row: &TableRow, group_col: usize, value_col: usize) -> Self {
        let mut passthrough = Vec::with_capacity(value_col.saturating_sub(1));
        for i in (0..value_col).filter(|i| *i != group_col) {
            passthrough.push(row.columns.get(i).cloned().unwrap_or_default());
        }
        KeyAccumulator {
            passthrough,
            total: 0.0,
            per_range: HashMap::new(),
        }
    }
}

/// Build the pivot table for one collected (item, table) pair.
///
/// Returns `None` when the declared key column points at or past the value
/// column; such a table is skipped wholesale rather than partially emitted.
pub fn build_pivot(table: &CollectedTable) -> Option<PivotTable> {
    let first_row = table.rows.first()?;

    // The value column is always the last one; the table's width is fixed
    // by its first row.
    let value_col = first_row.columns.len().checked_sub(1)?;
    let group_col = table.key_column_index.checked_sub(1)?;
    if group_col >= value_col {
        return None;
    }

    // Accumulators live in encounter order; the map only resolves a key to
    // its slot, so emitting rows later needs no fallible lookup.
    let mut accumulators: Vec<(String, KeyAccumulator)> = Vec::new();
    let mut key_slots: HashMap<String, usize> = HashMap::new();
    let mut range_order: Vec<String> = Vec::new();

    for row in &table.rows {
        let Some(key) = row.columns.get(group_col) else {
            // A row too short to even hold its key contributes nothing.
            continue;
        };

        let value = parse_value(row.columns.get(value_col));

        let slot = match key_slots.entry(key.clone()) {
            Entry::Vacant(entry) => {
                accumulators.push((
                    key.clone(),
                    KeyAccumulator::first_seen(row, group_col, value_col),
                ));
                *entry.insert(accumulators.len() - 1)
            }
            Entry::Occupied(entry) => *entry.get(),
        };
        let acc = &mut accumulators[slot].1;
        acc.total += value;
        *acc.per_range.entry(row.time_range.clone()).or_insert(0.0) += value;

        if !range_order.iter().any(|r| r == &row.time_range) {
            range_order.push(row.time_range.clone());
        }
    }

    // Chronological column order; stable, so tied ranks keep encounter order.
    range_order.sort_by_key(|range| hour_rank(range));

    let mut headers: Vec<String> = (1..=value_col).map(|n| format!("Column {}", n)).collect();
    headers.push("Total".to_string());
    headers.extend(range_order.iter().cloned());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(accumulators.len());
    for (key, acc) in &accumulators {
        let mut cells = acc.passthrough.clone();
        // Put the key back where its column originally was. The passthrough
        // always holds value_col - 1 cells, so group_col is in bounds.
        cells.insert(group_col, key.clone());
        cells.push(format_cell(acc.total));
        for range in &range_order {
            let sum = acc.per_range.get(range).copied().unwrap_or(0.0);
            cells.push(format_cell(sum));
        }
        rows.push(cells);
    }

    Some(PivotTable { headers, rows })
}

/// Value-column parse failures count as zero here, unlike the graph path
/// where the whole record is dropped.
fn parse_value(cell: Option<&String>) -> f64 {
    cell.and_then(|c| c.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

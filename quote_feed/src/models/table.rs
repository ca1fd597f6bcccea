//! The sparse wide table produced by merging per-symbol series.

use indexmap::IndexMap;

use crate::models::series::{QuoteSeries, SeriesOutcome};

/// Field delimiter of the serialized table.
pub const FIELD_DELIMITER: char = '|';

/// A merged, sparse wide table: one row per canonical timestamp, one column
/// per surviving symbol.
///
/// Row order is taken from the first valid series in input order, not from a
/// union or sort of all timestamps. A later symbol's timestamps that do not
/// appear in the first series are silently dropped. That narrow contract is
/// deliberate; callers wanting a full outer join need a different table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    /// `["Date", symbol1, symbol2, ...]` — only symbols with a valid series.
    pub header: Vec<String>,
    /// One row per canonical timestamp: `[timestamp, v1, ..., vn]`, where a
    /// cell is the empty string when that symbol has no quote there.
    pub rows: Vec<Vec<String>>,
}

impl MergedTable {
    /// Merges per-symbol outcomes into a wide table.
    ///
    /// Fully missing symbols are dropped from the header entirely rather
    /// than rendered as an all-blank column, and the surviving symbols keep
    /// their original relative order. Returns `None` when no symbol produced
    /// a valid series.
    pub fn from_outcomes(outcomes: &[SeriesOutcome]) -> Option<MergedTable> {
        let valid: Vec<&QuoteSeries> = outcomes
            .iter()
            .filter_map(SeriesOutcome::as_valid)
            .collect();
        let first = *valid.first()?;

        let mut header = Vec::with_capacity(valid.len() + 1);
        header.push("Date".to_string());
        header.extend(valid.iter().map(|series| series.symbol.clone()));

        // One timestamp -> value lookup per surviving symbol, index-aligned
        // with the header columns.
        let lookups: Vec<IndexMap<&str, &str>> = valid
            .iter()
            .map(|series| {
                series
                    .points
                    .iter()
                    .map(|point| (point.timestamp.as_str(), point.value.as_str()))
                    .collect()
            })
            .collect();

        let rows = first
            .points
            .iter()
            .map(|point| {
                let mut row = Vec::with_capacity(valid.len() + 1);
                row.push(point.timestamp.clone());
                for lookup in &lookups {
                    let cell = lookup
                        .get(point.timestamp.as_str())
                        .map_or_else(String::new, |value| (*value).to_string());
                    row.push(cell);
                }
                row
            })
            .collect();

        Some(MergedTable { header, rows })
    }

    /// Serializes the table as pipe-delimited fields and newline-delimited
    /// rows, with no trailing newline.
    ///
    /// Fields are joined raw, with no quoting or escaping: a value that
    /// itself contains `|` or a newline corrupts its row. The chart backend
    /// consumes this strict, lossy format as-is.
    pub fn to_delimited(&self) -> String {
        let delimiter = FIELD_DELIMITER.to_string();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header.join(&delimiter));
        for row in &self.rows {
            lines.push(row.join(&delimiter));
        }
        lines.join("\n")
    }
}

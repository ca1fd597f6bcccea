//! Per-symbol time series and the outcome of fetching one.

use crate::models::quote::QuotePoint;

/// The complete time series fetched for a single symbol.
///
/// Points appear in the order the quote source reported them; that order is
/// load-bearing, since the first valid series defines the row order of the
/// merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteSeries {
    /// The symbol this series represents (e.g. "NVDA").
    pub symbol: String,
    /// The observations, in source order. Never empty.
    pub points: Vec<QuotePoint>,
}

/// What became of one symbol's fetch after per-symbol degradation.
///
/// A network error or a response without the expected series container both
/// collapse to [`Missing`](SeriesOutcome::Missing); the distinction is logged
/// at the fetch site and does not survive into the merge. This keeps the
/// merge unable to confuse a dropped symbol with an aborted batch: batch
/// aborts are a separate error type, never an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesOutcome {
    /// The symbol yielded a non-empty series.
    Valid(QuoteSeries),
    /// The symbol yielded nothing usable and is dropped from the table.
    Missing,
}

impl SeriesOutcome {
    /// Returns the series if this outcome is valid.
    pub fn as_valid(&self) -> Option<&QuoteSeries> {
        match self {
            SeriesOutcome::Valid(series) => Some(series),
            SeriesOutcome::Missing => None,
        }
    }
}

//! Canonical in-memory representation of a single quote observation.

/// A closing-price observation for one symbol at one timestamp.
///
/// Both the timestamp and the value are kept as the opaque strings the quote
/// source returned. Timestamps are only compared for equality and used as
/// row keys, and values pass through to the chart backend verbatim, so
/// parsing either would add failure modes without changing any output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePoint {
    /// Timestamp key as reported by the quote source (e.g. "2024-03-01 16:00:00").
    pub timestamp: String,

    /// Closing price, decimal-as-string.
    pub value: String,

    /// The symbol this observation belongs to.
    pub symbol: String,
}

use indexmap::IndexMap;
use serde::Deserialize;

/// Wire shape of an Alpha Vantage time-series response.
///
/// The series container is an ordered JSON object keyed by timestamp;
/// [`IndexMap`] preserves that key order, which later becomes the row order
/// of the merged table. A body without the container (unknown symbol,
/// throttling) deserializes with `time_series: None` and usually carries one
/// of the two diagnostic fields instead.
#[derive(Deserialize, Debug)]
pub struct AvResponse {
    #[serde(rename = "Time Series (1min)")]
    pub time_series: Option<IndexMap<String, AvQuote>>,
    /// Set when the API throttles the caller.
    #[serde(rename = "Note")]
    pub note: Option<String>,
    /// Set when the request itself was rejected (e.g. unknown symbol).
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AvQuote {
    #[serde(rename = "4. close")]
    pub close: String,
}

use std::collections::HashMap;

use async_trait::async_trait;
use quote_feed::{
    fetch_and_merge,
    models::{QuotePoint, QuoteSeries},
    providers::{ApiSnafu, ProviderError, QuoteProvider},
    FetchError,
};

/// Scripted stand-in for a quote source: each symbol is mapped to a canned
/// series, a missing marker, or a forced failure.
enum Canned {
    Series(Vec<(&'static str, &'static str)>),
    Missing,
    Fail,
}

struct ScriptedProvider {
    responses: HashMap<String, Canned>,
}

impl ScriptedProvider {
    fn new(responses: Vec<(&str, Canned)>) -> Self {
        Self {
            responses: responses
                .into_iter()
                .map(|(symbol, canned)| (symbol.to_string(), canned))
                .collect(),
        }
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn fetch_series(&self, symbol: &str) -> Result<Option<QuoteSeries>, ProviderError> {
        match self.responses.get(symbol) {
            Some(Canned::Series(points)) => Ok(Some(QuoteSeries {
                symbol: symbol.to_string(),
                points: points
                    .iter()
                    .map(|(timestamp, value)| QuotePoint {
                        timestamp: (*timestamp).to_string(),
                        value: (*value).to_string(),
                        symbol: symbol.to_string(),
                    })
                    .collect(),
            })),
            Some(Canned::Missing) | None => Ok(None),
            Some(Canned::Fail) => ApiSnafu {
                message: "scripted failure".to_string(),
            }
            .fail(),
        }
    }
}

fn symbols(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

#[tokio::test]
async fn misaligned_series_pads_trailing_blank_cell() {
    let provider = ScriptedProvider::new(vec![
        ("A", Canned::Series(vec![("t1", "10.0"), ("t2", "11.0")])),
        ("B", Canned::Series(vec![("t1", "20.0")])),
    ]);

    let merged = fetch_and_merge(&provider, &symbols(&["A", "B"]))
        .await
        .unwrap();

    assert_eq!(merged, "Date|A|B\nt1|10.0|20.0\nt2|11.0|");
}

#[tokio::test]
async fn all_symbols_missing_is_a_batch_failure() {
    let provider = ScriptedProvider::new(vec![("A", Canned::Missing), ("B", Canned::Missing)]);

    let result = fetch_and_merge(&provider, &symbols(&["A", "B"])).await;

    assert!(matches!(result, Err(FetchError::NoDataAvailable { .. })));
}

#[tokio::test]
async fn failing_symbol_degrades_without_aborting_the_batch() {
    let provider = ScriptedProvider::new(vec![
        ("A", Canned::Fail),
        ("B", Canned::Series(vec![("t1", "20.0"), ("t2", "21.0")])),
    ]);

    let merged = fetch_and_merge(&provider, &symbols(&["A", "B"]))
        .await
        .unwrap();

    // A is dropped from the header entirely, not rendered as a blank column.
    assert_eq!(merged, "Date|B\nt1|20.0\nt2|21.0");
}

#[tokio::test]
async fn header_keeps_the_original_relative_symbol_order() {
    let provider = ScriptedProvider::new(vec![
        ("NFLX", Canned::Series(vec![("t1", "1")])),
        ("AMZN", Canned::Missing),
        ("GOOG", Canned::Series(vec![("t1", "2")])),
    ]);

    let merged = fetch_and_merge(&provider, &symbols(&["NFLX", "AMZN", "GOOG"]))
        .await
        .unwrap();

    assert!(merged.starts_with("Date|NFLX|GOOG\n"));
}

#[tokio::test]
async fn row_count_matches_the_first_valid_series() {
    let provider = ScriptedProvider::new(vec![
        ("A", Canned::Missing),
        ("B", Canned::Series(vec![("t1", "1"), ("t2", "2"), ("t3", "3")])),
        ("C", Canned::Series(vec![("t1", "9")])),
    ]);

    let merged = fetch_and_merge(&provider, &symbols(&["A", "B", "C"]))
        .await
        .unwrap();

    // First valid series is B, so its three timestamps define the rows.
    assert_eq!(merged.lines().count(), 4);
}

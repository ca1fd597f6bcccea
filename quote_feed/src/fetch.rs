//! Concurrent per-symbol fetch and merge into the serialized wide table.

use futures::future::join_all;
use log::warn;
use snafu::{Backtrace, Snafu};

use crate::{
    models::{series::SeriesOutcome, table::MergedTable},
    providers::QuoteProvider,
};

/// Batch-level fetch failures. Per-symbol failures never surface here; they
/// degrade to [`SeriesOutcome::Missing`] and are only logged.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FetchError {
    /// Every configured symbol came back missing; there is nothing to
    /// upload and the publish pipeline must not run.
    #[snafu(display("No quote data available for any configured symbol"))]
    NoDataAvailable { backtrace: Backtrace },
}

/// Fans out one fetch per symbol and collects the settled outcomes.
///
/// All requests are in flight simultaneously; the `join_all` barrier waits
/// for every one of them to settle, so a failing symbol never cancels its
/// siblings. Outcomes are index-aligned with `symbols`, which keeps the
/// symbol-to-column mapping intact without any shared accumulator.
pub async fn fetch_outcomes<P>(provider: &P, symbols: &[String]) -> Vec<SeriesOutcome>
where
    P: QuoteProvider + Sync,
{
    let fetches = symbols.iter().map(|symbol| provider.fetch_series(symbol));
    let settled = join_all(fetches).await;

    settled
        .into_iter()
        .zip(symbols)
        .map(|(result, symbol)| match result {
            Ok(Some(series)) => SeriesOutcome::Valid(series),
            Ok(None) => SeriesOutcome::Missing,
            Err(err) => {
                warn!("{symbol}: fetch failed, dropping symbol from this update: {err}");
                SeriesOutcome::Missing
            }
        })
        .collect()
}

/// Fetches all symbols concurrently and merges the surviving series into the
/// pipe-delimited wide table.
///
/// Fails with [`FetchError::NoDataAvailable`] when no symbol yields a valid
/// series; that early exit is what keeps the publish pipeline from running
/// against an empty payload.
pub async fn fetch_and_merge<P>(provider: &P, symbols: &[String]) -> Result<String, FetchError>
where
    P: QuoteProvider + Sync,
{
    let outcomes = fetch_outcomes(provider, symbols).await;

    let Some(table) = MergedTable::from_outcomes(&outcomes) else {
        return NoDataAvailableSnafu.fail();
    };

    Ok(table.to_delimited())
}

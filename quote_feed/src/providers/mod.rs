//! Provider abstraction for quote sources.
//!
//! This module defines the [`QuoteProvider`] trait, the unified interface
//! for fetching a per-symbol time series from a quote vendor. Each concrete
//! provider (such as Alpha Vantage) implements it to handle vendor-specific
//! request shapes and response validation.
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn QuoteProvider`) so the orchestrator can be tested with fakes.

pub mod alpha_vantage;

use async_trait::async_trait;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

use crate::models::series::QuoteSeries;

/// Trait for fetching one symbol's time series from a quote source.
///
/// Returns `Ok(None)` when the source answered but the response lacks the
/// expected series container (unknown symbol, throttling notice, empty
/// series). That is the provider-level signal for "treat this symbol as
/// missing"; transport and API failures come back as [`ProviderError`].
#[async_trait]
pub trait QuoteProvider {
    /// Fetches the series for `symbol`, or `None` when the source has no
    /// usable series for it.
    async fn fetch_series(&self, symbol: &str) -> Result<Option<QuoteSeries>, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// A credential environment variable is not set.
    #[snafu(display("Missing environment variable: {source}"))]
    MissingEnvVar {
        source: MissingEnvVarError,
        backtrace: Backtrace,
    },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `QuoteProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during the request itself (network failure, timeout,
    /// body decode).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The quote source returned a non-success status.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },
}

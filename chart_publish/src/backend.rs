//! Backend abstraction for chart services.
//!
//! [`ChartBackend`] is the seam between the pipeline and the concrete chart
//! service: each method is one one-shot remote mutation (or read) against a
//! chart identified by an opaque id. The pipeline drives the trait; tests
//! drive it with fakes that record calls.

use async_trait::async_trait;
use serde::Deserialize;
use shared_utils::env::MissingEnvVarError;
use snafu::{Backtrace, Snafu};

/// The backend's answer to a publish call.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PublishedChart {
    /// Public URL of the chart after republication.
    #[serde(rename = "publicUrl")]
    pub public_url: String,
}

/// Trait for the remote chart service.
///
/// All operations address a chart by its opaque id and hold no resource
/// beyond the lifetime of the call.
#[async_trait]
pub trait ChartBackend {
    /// Replaces the chart's stored data with `payload` verbatim.
    ///
    /// Re-uploading an identical payload leaves the stored data unchanged;
    /// the call still executes against the backend.
    async fn upload_data(&self, chart_id: &str, payload: &str) -> Result<(), BackendError>;

    /// Overwrites the chart's annotation notes.
    async fn update_notes(&self, chart_id: &str, notes: &str) -> Result<(), BackendError>;

    /// Makes the current data and metadata publicly visible and returns the
    /// public URL.
    async fn publish(&self, chart_id: &str) -> Result<PublishedChart, BackendError>;

    /// Reads back the chart's currently stored data.
    async fn chart_data(&self, chart_id: &str) -> Result<String, BackendError>;
}

/// Errors that can occur during the creation of a backend client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BackendInitError {
    /// The token environment variable is not set.
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

    /// The token contains characters that cannot appear in a header value.
    #[snafu(display("Invalid token format: {source}"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `ChartBackend` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum BackendError {
    /// An error during the request itself (network failure, timeout,
    /// body decode).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The backend returned a non-success status.
    #[snafu(display("API error ({status}): {message}"))]
    Api {
        status: u16,
        message: String,
        backtrace: Backtrace,
    },
}

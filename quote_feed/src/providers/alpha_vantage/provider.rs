use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::{
    models::{quote::QuotePoint, series::QuoteSeries},
    providers::{
        alpha_vantage::{params::construct_params, response::AvResponse},
        ApiSnafu, ClientBuildSnafu, MissingEnvVarSnafu, ProviderError, ProviderInitError,
        QuoteProvider, ReqwestSnafu,
    },
};

const BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable holding the Alpha Vantage API key.
pub const API_KEY_VAR: &str = "ALPHA_VANTAGE_API";

pub struct AlphaVantageProvider {
    client: Client,
    api_key: SecretString,
}

impl AlphaVantageProvider {
    /// Creates a provider with an explicitly supplied API key.
    ///
    /// The key travels as a query parameter, so the client itself carries no
    /// credential headers.
    pub fn new(api_key: SecretString) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        Ok(Self { client, api_key })
    }

    /// Creates a provider reading the API key from `ALPHA_VANTAGE_API`.
    pub fn from_env() -> Result<Self, ProviderInitError> {
        let api_key = SecretString::new(
            get_env_var(API_KEY_VAR)
                .context(MissingEnvVarSnafu)?
                .into(),
        );
        Self::new(api_key)
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    async fn fetch_series(&self, symbol: &str) -> Result<Option<QuoteSeries>, ProviderError> {
        let query = construct_params(symbol, self.api_key.expose_secret());

        let response = self
            .client
            .get(BASE_URL)
            .query(&query)
            .send()
            .await
            .context(ReqwestSnafu)?;

        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu { message }.fail();
        }

        let body = response.json::<AvResponse>().await.context(ReqwestSnafu)?;

        // Diagnostic bodies come back with HTTP 200; both cases mean the
        // symbol has no usable series right now.
        if let Some(message) = body.error_message {
            warn!("{symbol}: rejected by quote source: {message}");
            return Ok(None);
        }
        if let Some(note) = body.note {
            warn!("{symbol}: throttled by quote source: {note}");
            return Ok(None);
        }
        let Some(series) = body.time_series else {
            warn!("{symbol}: response lacks the expected series container");
            return Ok(None);
        };
        if series.is_empty() {
            warn!("{symbol}: series container is empty");
            return Ok(None);
        }

        let points = series
            .into_iter()
            .map(|(timestamp, quote)| QuotePoint {
                timestamp,
                value: quote.close,
                symbol: symbol.to_string(),
            })
            .collect();

        Ok(Some(QuoteSeries {
            symbol: symbol.to_string(),
            points,
        }))
    }
}

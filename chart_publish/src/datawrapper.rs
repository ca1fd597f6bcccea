//! Datawrapper implementation of [`ChartBackend`].

use async_trait::async_trait;
use reqwest::{header, Client, Response};
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use shared_utils::env::get_env_var;
use snafu::ResultExt;

use crate::backend::{
    ApiSnafu, BackendError, BackendInitError, ChartBackend, ClientBuildSnafu, InvalidTokenSnafu,
    MissingEnvVarSnafu, PublishedChart, ReqwestSnafu,
};

const BASE_URL: &str = "https://api.datawrapper.de/v3";

/// Environment variable holding the Datawrapper API token.
pub const TOKEN_VAR: &str = "DW_TOKEN";

pub struct DatawrapperClient {
    client: Client,
    _token: SecretString,
}

impl DatawrapperClient {
    /// Creates a client with an explicitly supplied API token.
    ///
    /// The bearer token is installed as a default header, marked sensitive
    /// so it never shows up in debug output.
    pub fn new(token: SecretString) -> Result<Self, BackendInitError> {
        let mut headers = header::HeaderMap::new();
        let bearer = format!("Bearer {}", token.expose_secret());
        let mut value = header::HeaderValue::from_str(&bearer).context(InvalidTokenSnafu)?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            _token: token,
        })
    }

    /// Creates a client reading the token from `DW_TOKEN`.
    pub fn from_env() -> Result<Self, BackendInitError> {
        let token = SecretString::new(get_env_var(TOKEN_VAR).context(MissingEnvVarSnafu)?.into());
        Self::new(token)
    }

    fn chart_url(&self, chart_id: &str, suffix: &str) -> String {
        format!("{BASE_URL}/charts/{chart_id}{suffix}")
    }

    /// Maps a non-success status to [`BackendError::Api`] carrying the
    /// response body as the message.
    async fn check(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown API error".to_string());
        ApiSnafu {
            status: status.as_u16(),
            message,
        }
        .fail()
    }
}

#[async_trait]
impl ChartBackend for DatawrapperClient {
    async fn upload_data(&self, chart_id: &str, payload: &str) -> Result<(), BackendError> {
        let response = self
            .client
            .put(self.chart_url(chart_id, "/data"))
            .header(header::CONTENT_TYPE, "text/csv")
            .body(payload.to_owned())
            .send()
            .await
            .context(ReqwestSnafu)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn update_notes(&self, chart_id: &str, notes: &str) -> Result<(), BackendError> {
        let body = json!({ "metadata": { "annotate": { "notes": notes } } });

        let response = self
            .client
            .patch(self.chart_url(chart_id, ""))
            .json(&body)
            .send()
            .await
            .context(ReqwestSnafu)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn publish(&self, chart_id: &str) -> Result<PublishedChart, BackendError> {
        let response = self
            .client
            .post(self.chart_url(chart_id, "/publish"))
            .send()
            .await
            .context(ReqwestSnafu)?;

        Self::check(response)
            .await?
            .json::<PublishedChart>()
            .await
            .context(ReqwestSnafu)
    }

    async fn chart_data(&self, chart_id: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .get(self.chart_url(chart_id, "/data"))
            .send()
            .await
            .context(ReqwestSnafu)?;

        Self::check(response).await?.text().await.context(ReqwestSnafu)
    }
}

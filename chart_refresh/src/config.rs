//! Configuration for a refresh run.
//!
//! The config file carries the chart id and symbol list; credentials may
//! live there too but normally come from the environment. Everything is
//! resolved here into one explicit struct that gets injected into the
//! provider and backend constructors, so nothing downstream reads process
//! state ad hoc.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use chart_publish::{datawrapper::TOKEN_VAR, PublishOptions};
use quote_feed::providers::alpha_vantage::provider::API_KEY_VAR;
use secrecy::SecretString;
use serde::Deserialize;
use shared_utils::env::get_env_var;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshConfig {
    /// Id of the chart to update.
    #[serde(default)]
    pub chart_id: String,

    /// Symbols to fetch, in the column order of the merged table.
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Quote-source API key. Falls back to `ALPHA_VANTAGE_API`.
    #[serde(default)]
    pub alpha_vantage_api_key: Option<String>,

    /// Chart-backend token. Falls back to `DW_TOKEN`.
    #[serde(default)]
    pub dw_token: Option<String>,

    /// Optional deadline for the whole quote fetch, in seconds.
    #[serde(default)]
    pub fetch_deadline_secs: Option<u64>,

    /// Optional per-stage deadline for the publish pipeline, in seconds.
    #[serde(default)]
    pub stage_deadline_secs: Option<u64>,
}

impl RefreshConfig {
    pub fn api_key(&self) -> Result<SecretString> {
        let key = match &self.alpha_vantage_api_key {
            Some(key) => key.clone(),
            None => get_env_var(API_KEY_VAR)?,
        };
        Ok(SecretString::new(key.into()))
    }

    pub fn dw_token(&self) -> Result<SecretString> {
        let token = match &self.dw_token {
            Some(token) => token.clone(),
            None => get_env_var(TOKEN_VAR)?,
        };
        Ok(SecretString::new(token.into()))
    }

    pub fn fetch_deadline(&self) -> Option<Duration> {
        self.fetch_deadline_secs.map(Duration::from_secs)
    }

    pub fn publish_options(&self) -> PublishOptions {
        PublishOptions {
            stage_deadline: self.stage_deadline_secs.map(Duration::from_secs),
        }
    }
}

/// Loads the config file (when given) and applies CLI overrides.
pub fn load(
    path: Option<&str>,
    chart_override: Option<String>,
    symbols_override: Option<String>,
) -> Result<RefreshConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            toml::from_str(&raw).with_context(|| format!("parsing config file {path}"))?
        }
        None => RefreshConfig::default(),
    };

    if let Some(chart_id) = chart_override {
        config.chart_id = chart_id;
    }
    if let Some(symbols) = symbols_override {
        config.symbols = symbols
            .split(',')
            .map(|symbol| symbol.trim().to_string())
            .filter(|symbol| !symbol.is_empty())
            .collect();
    }

    if config.chart_id.is_empty() {
        bail!("no chart id given: set chart_id in the config file or pass --chart");
    }
    if config.symbols.is_empty() {
        bail!("no symbols given: set symbols in the config file or pass --symbols");
    }

    Ok(config)
}

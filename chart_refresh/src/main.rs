//! Fetches the configured symbols' quote series, merges them into one wide
//! table, and pushes the result through the chart backend's
//! upload → annotate → republish pipeline.

mod config;

use anyhow::{bail, Context, Result};
use chart_publish::{datawrapper::DatawrapperClient, publish_chart, ChartBackend};
use chrono::Utc;
use clap::Parser;
use log::info;
use quote_feed::{
    fetch_and_merge,
    providers::{alpha_vantage::AlphaVantageProvider, QuoteProvider},
    FetchError,
};

use crate::config::RefreshConfig;

#[derive(Parser)]
#[command(version, about = "Refresh a chart with the latest quote data")]
struct Cli {
    /// Path to the config file (chart_refresh.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Comma-separated symbol override (e.g. "NVDA,AAPL")
    #[arg(long)]
    symbols: Option<String>,

    /// Chart id override
    #[arg(long)]
    chart: Option<String>,

    /// Fetch and merge only: print the table, touch no backend state
    #[arg(long)]
    dry_run: bool,
}

/// Fetches and merges the configured symbols, honoring the optional
/// whole-fetch deadline.
async fn fetch_table<P>(provider: &P, config: &RefreshConfig) -> Result<String>
where
    P: QuoteProvider + Sync,
{
    let fetch = fetch_and_merge(provider, &config.symbols);

    let result = match config.fetch_deadline() {
        Some(deadline) => match tokio::time::timeout(deadline, fetch).await {
            Ok(result) => result,
            Err(_) => bail!("[{}] Quote fetch exceeded its deadline.", config.chart_id),
        },
        None => fetch.await,
    };

    match result {
        Ok(merged) => Ok(merged),
        Err(FetchError::NoDataAvailable { .. }) => {
            bail!("[{}] No data available. Update aborted.", config.chart_id)
        }
    }
}

/// One full refresh: fetch, merge, publish. Returns the chart's public URL.
///
/// When the fetch yields nothing, the backend is never touched.
async fn refresh<P, B>(provider: &P, backend: &B, config: &RefreshConfig) -> Result<String>
where
    P: QuoteProvider + Sync,
    B: ChartBackend + Sync,
{
    let merged = fetch_table(provider, config).await?;
    info!("[{}] Fetched new data.", config.chart_id);

    publish_chart(
        backend,
        &config.chart_id,
        &merged,
        Utc::now(),
        &config.publish_options(),
    )
    .await
    .with_context(|| format!("[{}] Chart update failed", config.chart_id))
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref(), cli.chart, cli.symbols)?;

    let provider = AlphaVantageProvider::new(config.api_key()?)?;

    if cli.dry_run {
        let merged = fetch_table(&provider, &config).await?;
        println!("{merged}");
        return Ok(());
    }

    let backend = DatawrapperClient::new(config.dw_token()?)?;
    let public_url = refresh(&provider, &backend, &config).await?;

    // The backend hands back a protocol-relative URL.
    println!("https:{public_url}");
    Ok(())
}

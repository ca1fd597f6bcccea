//! Alpha Vantage implementation of [`QuoteProvider`](crate::providers::QuoteProvider).

pub mod params;
pub mod provider;
pub mod response;

pub use provider::AlphaVantageProvider;

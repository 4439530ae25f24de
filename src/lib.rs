//! Exchange Rate Index
//!
//! This library merges the exchange rates held by several price providers
//! into one market-price response, with per-provider freshness metadata,
//! and serves it over HTTP.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;

// Re-export commonly used items
pub use aggregator::{aggregate, ExchangeRateService, REFERENCE_TS_KEY};
pub use api::start_server;
pub use crate::config::SETTINGS;
pub use error::{PriceIndexError, Result};
pub use models::{ExchangeRate, MarketPrices, Metadata};

// Re-export provider types
pub use providers::cached::CachedProvider;
pub use providers::http::{HttpRateSource, QuotedPrice, RateSource};
pub use providers::registry::{ProviderRegistry, ScheduledProvider};
pub use providers::{ExchangeRateProvider, ProviderRole};

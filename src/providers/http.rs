// REST client for upstream rate feeds

use crate::error::{PriceIndexError, Result};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A raw quote as served by an upstream feed, before it is stamped with a
/// provider name and fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotedPrice {
    pub currency: String,
    pub price: f64,
}

/// Somewhere a provider can pull fresh quotes from.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_quotes(&self) -> Result<Vec<QuotedPrice>>;
}

/// Polls a JSON endpoint returning `[{"currency": "USD", "price": 50000.0}, ...]`.
pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PriceIndexError::ProviderError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_quotes(&self) -> Result<Vec<QuotedPrice>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceIndexError::ProviderError(format!(
                "{} responded with {}",
                self.url, status
            )));
        }

        let body = response.bytes().await?;
        let quotes: Vec<QuotedPrice> = serde_json::from_slice(&body)?;
        debug!("Fetched {} quotes from {}", quotes.len(), self.url);
        Ok(quotes)
    }
}

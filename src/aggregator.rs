// Merge of provider rates into one market-price response
use crate::error::{PriceIndexError, Result};
use crate::models::{ExchangeRate, MarketPrices, Metadata, RateBook};
use crate::providers::ExchangeRateProvider;
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

/// Legacy metadata key carrying the reference provider's timestamp.
pub const REFERENCE_TS_KEY: &str = "btcAverageTs";

/// Merges the current rates of `providers` into a single response.
///
/// Providers are given in ascending order of precedence: when two of them
/// quote the same currency, the later one wins. Currencies keep the position
/// of their first occurrence.
///
/// Fails with `MissingProviderData` as soon as a provider returns no rate
/// under its own name; no partial result is produced.
pub fn aggregate<'a, I>(providers: I) -> Result<MarketPrices>
where
    I: IntoIterator<Item = &'a dyn ExchangeRateProvider>,
{
    let mut metadata = Metadata::new();
    let mut book = RateBook::default();

    for provider in providers {
        let rates = provider.get();
        let timestamp = provider_timestamp(provider, &rates)?;

        if provider.role().is_reference() {
            metadata.insert(REFERENCE_TS_KEY, timestamp);
        }

        let prefix = provider.prefix();
        metadata.insert(format!("{}Ts", prefix), timestamp);
        metadata.insert(format!("{}Count", prefix), distinct_currencies(&rates) as i64);

        for rate in rates {
            book.put(rate);
        }
    }

    Ok(MarketPrices::new(metadata, book.into_rates()))
}

fn provider_timestamp(provider: &dyn ExchangeRateProvider, rates: &[ExchangeRate]) -> Result<i64> {
    rates
        .iter()
        .find(|rate| rate.provider() == provider.name())
        .map(ExchangeRate::timestamp)
        .ok_or_else(|| PriceIndexError::MissingProviderData(provider.name().to_string()))
}

fn distinct_currencies(rates: &[ExchangeRate]) -> usize {
    rates
        .iter()
        .map(ExchangeRate::currency)
        .collect::<HashSet<_>>()
        .len()
}

/// High-level exchange rate operations over a fixed, ordered provider list.
#[derive(Clone)]
pub struct ExchangeRateService {
    providers: Vec<Arc<dyn ExchangeRateProvider>>,
}

impl ExchangeRateService {
    /// `providers` must be in ascending order of precedence.
    pub fn new(providers: Vec<Arc<dyn ExchangeRateProvider>>) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &[Arc<dyn ExchangeRateProvider>] {
        &self.providers
    }

    pub fn get_all_market_prices(&self) -> Result<MarketPrices> {
        let prices = aggregate(
            self.providers
                .iter()
                .map(|p| p.as_ref() as &dyn ExchangeRateProvider),
        )?;
        debug!(
            "Aggregated {} rates from {} providers",
            prices.data().len(),
            self.providers.len()
        );
        Ok(prices)
    }
}

// In-memory snapshot provider, periodic refresh
use crate::error::Result;
use crate::models::ExchangeRate;
use crate::providers::http::RateSource;
use crate::providers::{ExchangeRateProvider, ProviderRole};
use chrono::Utc;
use log::{debug, warn};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A provider that serves the last snapshot it was given.
///
/// The snapshot is replaced wholesale, either directly through `update` or
/// by `refresh` from a `RateSource`. Readers never see a half-written set.
pub struct CachedProvider {
    name: String,
    prefix: String,
    role: ProviderRole,
    rates: RwLock<Vec<ExchangeRate>>,
}

impl CachedProvider {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, role: ProviderRole) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            role,
            rates: RwLock::new(Vec::new()),
        }
    }

    /// Builds a provider already holding `rates`.
    pub fn with_rates(
        name: impl Into<String>,
        prefix: impl Into<String>,
        role: ProviderRole,
        rates: Vec<ExchangeRate>,
    ) -> Self {
        let provider = Self::new(name, prefix, role);
        provider.update(rates);
        provider
    }

    pub fn update(&self, rates: Vec<ExchangeRate>) {
        let mut guard = self.rates.write().unwrap_or_else(PoisonError::into_inner);
        *guard = rates;
    }

    /// Pulls fresh quotes from `source` and stores them stamped with this
    /// provider's name and the current time. On failure the previous
    /// snapshot is kept.
    pub async fn refresh(&self, source: &dyn RateSource) -> Result<usize> {
        let quotes = source.fetch_quotes().await?;
        let timestamp = Utc::now().timestamp_millis();

        let rates: Vec<ExchangeRate> = quotes
            .into_iter()
            .map(|quote| ExchangeRate::new(quote.currency, quote.price, &self.name, timestamp))
            .collect();
        let count = rates.len();

        self.update(rates);
        Ok(count)
    }

    /// Refreshes from `source` every `interval` until the task is aborted.
    /// The first refresh happens one interval after spawning; prime the
    /// snapshot with `refresh` beforehand.
    pub fn spawn_refresh(
        self: Arc<Self>,
        source: Arc<dyn RateSource>,
        interval: Duration,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            // A slow fetch pushes the schedule back instead of bunching refreshes
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match self.refresh(source.as_ref()).await {
                    Ok(count) => debug!("Refreshed {} rates for {}", count, self.name),
                    Err(e) => warn!("Failed to refresh {}: {}", self.name, e),
                }
            }
        })
    }
}

impl ExchangeRateProvider for CachedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn role(&self) -> ProviderRole {
        self.role
    }

    fn get(&self) -> Vec<ExchangeRate> {
        self.rates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

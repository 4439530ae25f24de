// Explicit, ordered provider registration
use crate::aggregator::ExchangeRateService;
use crate::config::ProviderSettings;
use crate::error::{PriceIndexError, Result};
use crate::providers::cached::CachedProvider;
use crate::providers::http::{HttpRateSource, RateSource};
use crate::providers::ExchangeRateProvider;
use log::info;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The provider list handed to the aggregator, in ascending order of
/// precedence. Each `register` call adds a provider that overrides every
/// provider registered before it.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ExchangeRateProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, provider: Arc<dyn ExchangeRateProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn providers(&self) -> &[Arc<dyn ExchangeRateProvider>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn into_service(self) -> ExchangeRateService {
        ExchangeRateService::new(self.providers)
    }

    /// Builds one HTTP-backed cached provider per configured entry, keeping
    /// the configuration order as precedence order.
    pub fn from_settings(
        settings: &[ProviderSettings],
        timeout: Duration,
    ) -> Result<(Self, Vec<ScheduledProvider>)> {
        let mut seen = HashSet::new();
        let mut registry = Self::new();
        let mut scheduled = Vec::with_capacity(settings.len());

        for entry in settings {
            if !seen.insert(entry.name.as_str()) {
                return Err(PriceIndexError::ConfigError(format!(
                    "Provider {} is configured more than once",
                    entry.name
                )));
            }
            if entry.refresh_interval == 0 {
                return Err(PriceIndexError::ConfigError(format!(
                    "Provider {} needs a refresh interval above zero",
                    entry.name
                )));
            }

            let provider = Arc::new(CachedProvider::new(
                entry.name.clone(),
                entry.prefix.clone(),
                entry.role(),
            ));
            let source = Arc::new(HttpRateSource::new(entry.url.clone(), timeout)?);
            info!(
                "Registered provider {} (prefix {}) from {}",
                entry.name, entry.prefix, entry.url
            );

            registry = registry.register(provider.clone());
            scheduled.push(ScheduledProvider {
                provider,
                source,
                interval: entry.refresh_interval(),
            });
        }

        Ok((registry, scheduled))
    }
}

/// A cached provider paired with the source and interval that keep it
/// current.
pub struct ScheduledProvider {
    pub provider: Arc<CachedProvider>,
    pub source: Arc<dyn RateSource>,
    pub interval: Duration,
}

impl ScheduledProvider {
    pub async fn refresh(&self) -> Result<usize> {
        self.provider.refresh(self.source.as_ref()).await
    }

    pub fn start(self) -> JoinHandle<()> {
        self.provider.spawn_refresh(self.source, self.interval)
    }
}

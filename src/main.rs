// Logging, provider registration, refresh tasks, Actix server

use exchange_rate_index::{
    api, config, ExchangeRateProvider, ProviderRegistry, ScheduledProvider,
};
use futures::future::join_all;
use log::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting exchange rate index ...");

    config::Settings::reload()?;

    let (registry, scheduled) =
        ProviderRegistry::from_settings(&config::get_providers(), config::get_http_timeout())?;
    if registry.is_empty() {
        warn!("No providers configured, responses will carry no rates");
    }

    // Prime every cache before serving so the first request has data
    let results = join_all(scheduled.iter().map(|entry| entry.refresh())).await;
    for (entry, result) in scheduled.iter().zip(results) {
        match result {
            Ok(count) => info!("Loaded {} rates for {}", count, entry.provider.name()),
            Err(e) => warn!("Initial refresh of {} failed: {}", entry.provider.name(), e),
        }
    }

    let _refreshers: Vec<_> = scheduled.into_iter().map(ScheduledProvider::start).collect();

    api::start_server(registry.into_service()).await?;
    Ok(())
}

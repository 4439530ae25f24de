// Provider trait, roles
use crate::models::ExchangeRate;

pub mod cached;
pub mod http;
pub mod registry;

/// Marks the one provider whose timestamp is also published under the
/// legacy `btcAverageTs` metadata key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderRole {
    #[default]
    Standard,
    Reference,
}

impl ProviderRole {
    pub fn is_reference(self) -> bool {
        self == ProviderRole::Reference
    }
}

/// The ExchangeRateProvider trait defines the interface every price source
/// exposes to the aggregator.
///
/// Implementations serve rates they already hold in memory; any network
/// I/O needed to keep them current happens outside `get()`.
pub trait ExchangeRateProvider: Send + Sync {
    /// Stable identity of the provider. Every rate returned by `get()` must
    /// carry this name in its `provider` field.
    fn name(&self) -> &str;

    /// Short namespace used for the provider's metadata keys
    /// (`{prefix}Ts`, `{prefix}Count`).
    fn prefix(&self) -> &str;

    fn role(&self) -> ProviderRole {
        ProviderRole::Standard
    }

    /// Returns the current rates, one entry per supported currency.
    fn get(&self) -> Vec<ExchangeRate>;
}

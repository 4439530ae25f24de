// ExchangeRate, Metadata, MarketPrices
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// A single quote for one currency, as reported by one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    currency: String,
    price: f64,
    provider: String,
    timestamp: i64, // epoch millis
}

impl ExchangeRate {
    pub fn new(
        currency: impl Into<String>,
        price: f64,
        provider: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        Self {
            currency: currency.into(),
            price,
            provider: provider.into(),
            timestamp,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Per-provider summary fields, kept in insertion order.
///
/// Inserting a key that is already present replaces its value without
/// moving it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, i64)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: i64) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// The merged response: provider metadata followed by the winning rate for
/// every currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketPrices {
    metadata: Metadata,
    data: Vec<ExchangeRate>,
}

impl MarketPrices {
    pub fn new(metadata: Metadata, data: Vec<ExchangeRate>) -> Self {
        Self { metadata, data }
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn data(&self) -> &[ExchangeRate] {
        &self.data
    }

    pub fn rate(&self, currency: &str) -> Option<&ExchangeRate> {
        self.data.iter().find(|rate| rate.currency == currency)
    }

    pub fn into_parts(self) -> (Metadata, Vec<ExchangeRate>) {
        (self.metadata, self.data)
    }
}

// Flattened into a single object: metadata keys first, then "data".
impl Serialize for MarketPrices {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.metadata.len() + 1))?;
        for (key, value) in self.metadata.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.serialize_entry("data", &self.data)?;
        map.end()
    }
}

/// Currency-keyed merge where a later write replaces the value but keeps the
/// position of the first insertion.
#[derive(Debug, Default)]
pub(crate) struct RateBook {
    index: HashMap<String, usize>,
    rates: Vec<ExchangeRate>,
}

impl RateBook {
    pub(crate) fn put(&mut self, rate: ExchangeRate) {
        match self.index.get(rate.currency()) {
            Some(&slot) => self.rates[slot] = rate,
            None => {
                self.index.insert(rate.currency.clone(), self.rates.len());
                self.rates.push(rate);
            }
        }
    }

    pub(crate) fn into_rates(self) -> Vec<ExchangeRate> {
        self.rates
    }
}

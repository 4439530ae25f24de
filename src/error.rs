// Custom error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceIndexError {
    /// A provider returned no rate carrying its own name. This is a contract
    /// violation in the provider and aborts the whole aggregation.
    #[error("No exchange rate data found for {0}")]
    MissingProviderData(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A type alias for Result that uses our custom error type
pub type Result<T> = std::result::Result<T, PriceIndexError>;

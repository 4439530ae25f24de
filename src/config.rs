use crate::providers::ProviderRole;
use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::Deserialize;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use std::time::Duration;

// Global configuration, starts from defaults until `Settings::reload` runs
lazy_static! {
    pub static ref SETTINGS: RwLock<Settings> = RwLock::new(Settings::default());
}

const CONFIG_FILE: &str = "config";
const ENV_PREFIX: &str = "PRICENODE";

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Http {
    /// Upstream request timeout, in seconds
    pub timeout: u64,
}

/// One upstream feed. The order of the `providers` array is the precedence
/// order: later entries override earlier ones for the same currency.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProviderSettings {
    pub name: String,
    pub prefix: String,
    pub url: String,
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
    #[serde(default)]
    pub reference: bool,
}

fn default_refresh_interval() -> u64 {
    60
}

impl ProviderSettings {
    pub fn role(&self) -> ProviderRole {
        if self.reference {
            ProviderRole::Reference
        } else {
            ProviderRole::Standard
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: Server,
    #[serde(default)]
    pub http: Http,
    #[serde(default)]
    pub providers: Vec<ProviderSettings>,
}

impl Default for Http {
    fn default() -> Self {
        Self { timeout: 10 }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: Server {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            http: Http::default(),
            providers: Vec::new(),
        }
    }
}

impl Settings {
    /// Loads `config.toml` (or .yaml/.json) from the working directory,
    /// overridden by `PRICENODE_SERVER__PORT` style variables.
    pub fn new() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::load(CONFIG_FILE, ENV_PREFIX)
    }

    /// Layers, lowest first: built-in defaults, the optional `file`, then
    /// environment variables named `{env_prefix}_SECTION__KEY`.
    pub fn load(file: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let defaults = Settings::default();

        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("http.timeout", defaults.http.timeout as i64)?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    // Helper method to reload configuration
    pub fn reload() -> Result<(), ConfigError> {
        let settings = Settings::new()?;
        let mut write_guard = SETTINGS.write().unwrap_or_else(PoisonError::into_inner);
        *write_guard = settings;
        Ok(())
    }
}

fn settings() -> RwLockReadGuard<'static, Settings> {
    SETTINGS.read().unwrap_or_else(PoisonError::into_inner)
}

// Convenience methods to get configuration values
pub fn get_server_addr() -> String {
    let settings = settings();
    format!("{}:{}", settings.server.host, settings.server.port)
}

pub fn get_http_timeout() -> Duration {
    Duration::from_secs(settings().http.timeout)
}

pub fn get_providers() -> Vec<ProviderSettings> {
    settings().providers.clone()
}

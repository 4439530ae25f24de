use exchange_rate_index::config::{self, ProviderSettings, Settings};
use exchange_rate_index::ProviderRole;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

// Each test uses its own environment prefix so parallel tests never see
// each other's variables.

fn config_name(dir: &Path) -> String {
    dir.join("config").to_string_lossy().into_owned()
}

#[test]
fn test_env_overrides_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var("XRI_NOFILE_SERVER__PORT", "9099");
    env::set_var("XRI_NOFILE_HTTP__TIMEOUT", "3");

    let settings = Settings::load(&config_name(dir.path()), "XRI_NOFILE").unwrap();

    assert_eq!(settings.server.port, 9099);
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.http.timeout, 3);
    assert!(settings.providers.is_empty());
}

#[test]
fn test_defaults_without_file_or_env() {
    let dir = tempfile::tempdir().unwrap();

    let settings = Settings::load(&config_name(dir.path()), "XRI_EMPTY").unwrap();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.http.timeout, 10);
    assert!(settings.providers.is_empty());
}

#[test]
fn test_file_with_env_override() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[server]
host = "0.0.0.0"
port = 8081

[[providers]]
name = "BitcoinAverage"
prefix = "btcAverageL"
url = "http://localhost:9000/btcaverage"
reference = true

[[providers]]
name = "Poloniex"
prefix = "poloniex"
url = "http://localhost:9000/poloniex"
refresh_interval = 30
"#,
    )
    .unwrap();
    env::set_var("XRI_LAYERED_SERVER__PORT", "9100");

    let settings = Settings::load(&config_name(dir.path()), "XRI_LAYERED").unwrap();

    // File value kept, env value wins, untouched default survives
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.http.timeout, 10);

    assert_eq!(
        settings.providers,
        vec![
            ProviderSettings {
                name: "BitcoinAverage".to_string(),
                prefix: "btcAverageL".to_string(),
                url: "http://localhost:9000/btcaverage".to_string(),
                refresh_interval: 60,
                reference: true,
            },
            ProviderSettings {
                name: "Poloniex".to_string(),
                prefix: "poloniex".to_string(),
                url: "http://localhost:9000/poloniex".to_string(),
                refresh_interval: 30,
                reference: false,
            },
        ]
    );
    assert_eq!(settings.providers[0].role(), ProviderRole::Reference);
    assert_eq!(settings.providers[1].refresh_interval(), Duration::from_secs(30));
}

/// Tests that a provider entry missing required fields is reported as an
/// error instead of silently falling back to defaults.
#[test]
fn test_malformed_provider_entry_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[[providers]]
name = "Kraken"
refresh_interval = 30
"#,
    )
    .unwrap();

    let result = Settings::load(&config_name(dir.path()), "XRI_MALFORMED");

    assert!(result.is_err());
}

#[test]
fn test_unparseable_env_value_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var("XRI_BADPORT_SERVER__PORT", "not-a-port");

    let result = Settings::load(&config_name(dir.path()), "XRI_BADPORT");

    assert!(result.is_err());
}

/// Tests that reading the global settings before any load yields the
/// defaults rather than panicking.
#[test]
fn test_global_settings_start_from_defaults() {
    assert_eq!(config::get_server_addr(), "127.0.0.1:8080");
    assert_eq!(config::get_http_timeout(), Duration::from_secs(10));
    assert!(config::get_providers().is_empty());
}

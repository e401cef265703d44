//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Where report payloads come from.
    pub source: SourceConfig,
    /// Report view defaults.
    #[serde(default)]
    pub reports: ReportsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Upstream report source.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// The backend REST API.
    Http(HttpSourceConfig),
    /// A directory of `{report}.json` payloads.
    Fixtures(FixtureSourceConfig),
}

/// Backend REST API settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSourceConfig {
    /// Base URL, e.g. `https://erp.example.edu/api`.
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Fixture directory settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSourceConfig {
    /// Directory holding one JSON payload per report kind.
    pub dir: String,
}

/// Report view defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// Whether zero-amount rows are shown when the request does not say.
    #[serde(default = "default_include_zero")]
    pub include_zero: bool,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            include_zero: default_include_zero(),
        }
    }
}

fn default_include_zero() -> bool {
    true
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_http_source_from_env() {
        temp_env::with_vars(
            [
                ("TALLY__SOURCE__KIND", Some("http")),
                ("TALLY__SOURCE__BASE_URL", Some("http://localhost:9000/api")),
                ("TALLY__SOURCE__TIMEOUT_SECS", Some("5")),
                ("TALLY__SERVER__PORT", Some("3100")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.server.port, 3100);
                assert_eq!(config.server.host, "0.0.0.0");
                assert!(config.reports.include_zero);
                match config.source {
                    SourceConfig::Http(http) => {
                        assert_eq!(http.base_url, "http://localhost:9000/api");
                        assert_eq!(http.timeout_secs, 5);
                        assert!(http.token.is_none());
                    }
                    SourceConfig::Fixtures(_) => panic!("expected http source"),
                }
            },
        );
    }

    #[test]
    fn test_load_fixture_source_from_env() {
        temp_env::with_vars(
            [
                ("TALLY__SOURCE__KIND", Some("fixtures")),
                ("TALLY__SOURCE__DIR", Some("./fixtures")),
                ("TALLY__REPORTS__INCLUDE_ZERO", Some("false")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert!(!config.reports.include_zero);
                assert!(matches!(
                    config.source,
                    SourceConfig::Fixtures(FixtureSourceConfig { ref dir }) if dir == "./fixtures"
                ));
            },
        );
    }

    #[test]
    fn test_missing_source_is_an_error() {
        temp_env::with_vars_unset(
            ["TALLY__SOURCE__KIND", "TALLY__SOURCE__BASE_URL", "TALLY__SOURCE__DIR"],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}

//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Valuation engine configuration.
    #[serde(default)]
    pub valuation: ValuationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Valuation engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    /// Method used when a caller does not request one (AVERAGE, FIFO or LIFO).
    #[serde(default = "default_method")]
    pub default_method: String,
    /// Minimum number of products in a batch before valuation runs in parallel.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_method() -> String {
    "AVERAGE".to_string()
}

fn default_parallel_threshold() -> usize {
    64
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            default_method: default_method(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "stockval=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Reads `.env` first (if present), then `config/default`,
    /// `config/{RUN_MODE}` and finally `STOCKVAL__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOCKVAL").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub kafka: KafkaConfig,
    #[serde(default)]
    pub scanner: ScannerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,
    /// Maximum connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct KafkaConfig {
    /// Comma-separated broker list (e.g., "localhost:9092")
    pub brokers: String,
    /// Client identifier reported to the brokers
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Producer send timeout in milliseconds
    #[serde(default = "default_send_timeout")]
    pub send_timeout_ms: u64,
}

fn default_client_id() -> String {
    "lottery-api".to_string()
}

fn default_send_timeout() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerConfig {
    /// Seconds between inactivity scans (production intent is daily;
    /// lower values exist for integration testing)
    #[serde(default = "default_scan_interval")]
    pub interval_secs: u64,
    /// Trailing window, in days, that counts a user as active
    #[serde(default = "default_window_days")]
    pub window_days: i64,
}

fn default_scan_interval() -> u64 {
    86_400
}

fn default_window_days() -> i64 {
    7
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_scan_interval(),
            window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("database.max_connections", 5)?
            .set_default("kafka.client_id", "lottery-api")?
            .set_default("kafka.send_timeout_ms", 5000)?
            .set_default("scanner.interval_secs", 86_400)?
            .set_default("scanner.window_days", 7)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("LOTOBET_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (LOTOBET_DATABASE__URL, etc.)
            .add_source(
                Environment::with_prefix("LOTOBET")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.database.url.is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if self.kafka.brokers.is_empty() {
            errors.push("kafka.brokers must not be empty".to_string());
        }

        if self.scanner.interval_secs == 0 {
            errors.push("scanner.interval_secs must be positive".to_string());
        }

        if self.scanner.window_days <= 0 {
            errors.push("scanner.window_days must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

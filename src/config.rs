//! Configuration management for the weather proxy
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherProxyError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR: &str = "nws-weather-proxy";
const ENV_PREFIX: &str = "WEATHER_PROXY";

/// Root configuration structure for the weather proxy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherProxyConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// NWS API client settings
    pub upstream: UpstreamConfig,
    /// How many items of each list end up in a response
    pub limits: LimitsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Optional TLS certificate for serving HTTPS
    pub tls: TlsConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `index.html` and the assets served under `/static`
    pub static_dir: PathBuf,
    /// Upper bound for handling one inbound request
    pub request_timeout_seconds: u32,
}

/// NWS API client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the NWS API
    pub base_url: String,
    /// NWS asks every client to identify itself with a contact
    pub user_agent: String,
    /// Timeout for each outbound request in seconds
    pub timeout_seconds: u32,
}

/// Response list limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Forecast periods returned (7 days, day + night)
    pub forecast_periods: usize,
    /// Hourly periods returned
    pub hourly_periods: usize,
    /// Alerts embedded in the weather payload
    pub weather_alerts: usize,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_request_timeout() -> u32 {
    30
}

fn default_upstream_base_url() -> String {
    "https://api.weather.gov".to_string()
}

fn default_user_agent() -> String {
    "(Weather Website, contact@example.com)".to_string()
}

fn default_upstream_timeout() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_upstream_timeout(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            forecast_periods: 14,
            hourly_periods: 24,
            weather_alerts: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl WeatherProxyConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // An explicitly named file must exist, the default location is optional
        let (config_file, required) = match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(WeatherProxyError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                (path, true)
            }
            None => (
                Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml")),
                false,
            ),
        };

        if required || config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(required)
                    .format(config::FileFormat::Toml),
            );
        }

        // WEATHER_PROXY_UPSTREAM__BASE_URL -> upstream.base_url
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherProxyConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Replace empty values left by a partial config file with defaults
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.static_dir.as_os_str().is_empty() {
            self.server.static_dir = default_static_dir();
        }
        if self.server.request_timeout_seconds == 0 {
            self.server.request_timeout_seconds = default_request_timeout();
        }
        if self.upstream.base_url.is_empty() {
            self.upstream.base_url = default_upstream_base_url();
        }
        if self.upstream.user_agent.is_empty() {
            self.upstream.user_agent = default_user_agent();
        }
        if self.upstream.timeout_seconds == 0 {
            self.upstream.timeout_seconds = default_upstream_timeout();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        // NWS does not need the trailing slash and format!-built URLs would double it
        while self.upstream.base_url.ends_with('/') {
            self.upstream.base_url.pop();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        self.validate_tls()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.upstream.timeout_seconds > 300 {
            return Err(
                WeatherProxyError::config("Upstream timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.server.request_timeout_seconds > 300 {
            return Err(
                WeatherProxyError::config("Request timeout cannot exceed 300 seconds").into(),
            );
        }

        let limits = [
            ("forecast_periods", self.limits.forecast_periods),
            ("hourly_periods", self.limits.hourly_periods),
            ("weather_alerts", self.limits.weather_alerts),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(
                    WeatherProxyError::config(format!("Limit '{name}' must be at least 1")).into(),
                );
            }
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherProxyError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherProxyError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.upstream.base_url.starts_with("http://")
            && !self.upstream.base_url.starts_with("https://")
        {
            return Err(WeatherProxyError::config(
                "Upstream base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        if self.upstream.user_agent.trim().is_empty() {
            return Err(WeatherProxyError::config("Upstream user agent cannot be empty").into());
        }

        Ok(())
    }

    fn validate_tls(&self) -> Result<()> {
        match (&self.tls.cert_path, &self.tls.key_path) {
            (Some(_), None) | (None, Some(_)) => Err(WeatherProxyError::config(
                "TLS needs both cert_path and key_path",
            )
            .into()),
            _ => Ok(()),
        }
    }
}

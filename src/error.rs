//! Error types and handling for the weather proxy

use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the weather proxy
#[derive(Error, Debug)]
pub enum WeatherProxyError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Query parameter validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The NWS grid lookup does not know the coordinate
    #[error("Location not supported. NWS API only covers US locations.")]
    LocationUnsupported,

    /// The grid lookup succeeded but carried no forecast link
    #[error("Could not get forecast URL from NWS")]
    MissingForecastUrl,

    /// NWS answered with a non-success status
    #[error("NWS API returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// NWS could not be reached (connect failure, timeout)
    #[error("Error connecting to NWS API: {message}")]
    UpstreamUnavailable { message: String },

    /// NWS answered but the body could not be decoded
    #[error("Invalid response from NWS API: {message}")]
    InvalidResponse { message: String },
}

impl WeatherProxyError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn upstream_status<S: Into<String>>(status: u16, url: S) -> Self {
        Self::UpstreamStatus {
            status,
            url: url.into(),
        }
    }

    pub fn upstream_unavailable<S: Into<String>>(message: S) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }

    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// HTTP status the API layer answers with for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherProxyError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            WeatherProxyError::LocationUnsupported => StatusCode::NOT_FOUND,
            WeatherProxyError::UpstreamStatus { .. }
            | WeatherProxyError::InvalidResponse { .. } => StatusCode::BAD_GATEWAY,
            WeatherProxyError::UpstreamUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            WeatherProxyError::Config { .. }
            | WeatherProxyError::MissingForecastUrl => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for WeatherProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::invalid_response(err.to_string());
        }
        if let Some(status) = err.status() {
            let url = err.url().map(ToString::to_string).unwrap_or_default();
            return Self::upstream_status(status.as_u16(), url);
        }
        Self::upstream_unavailable(err.to_string())
    }
}

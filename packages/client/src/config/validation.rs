//! Settings validation

use std::time::Duration;

use super::defaults::MAX_TIMEOUT;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Proxy host must not be empty")]
    MissingHost,

    #[error("Proxy port must not be zero")]
    InvalidPort,

    #[error("Unknown proxy type: {0}")]
    UnknownProxyKind(String),

    #[error("Unsupported proxy scheme: {0}. Supported schemes are http, socks4, socks4a, socks5, socks5h")]
    UnsupportedScheme(String),

    #[error("Invalid proxy URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid proxy settings document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` found.
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds 1 hour (3600 seconds)
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{name} cannot be zero")));
        }
        if timeout > MAX_TIMEOUT {
            return Err(ConfigError::InvalidTimeout(format!(
                "{name} cannot exceed {} seconds",
                MAX_TIMEOUT.as_secs()
            )));
        }
        Ok(())
    }

    /// Validate a proxy host/port pair
    ///
    /// # Errors
    ///
    /// Returns `MissingHost` for a blank host and `InvalidPort` for port 0.
    pub fn validate_endpoint(host: &str, port: u16) -> ConfigResult<()> {
        if host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_bounds() {
        assert!(ConfigValidator::validate_timeout(Duration::ZERO, "timeout").is_err());
        assert!(ConfigValidator::validate_timeout(Duration::from_secs(7200), "timeout").is_err());
        assert!(ConfigValidator::validate_timeout(Duration::from_secs(10), "timeout").is_ok());
    }

    #[test]
    fn test_endpoint_rules() {
        assert!(matches!(
            ConfigValidator::validate_endpoint("  ", 1080),
            Err(ConfigError::MissingHost)
        ));
        assert!(matches!(
            ConfigValidator::validate_endpoint("proxy.local", 0),
            Err(ConfigError::InvalidPort)
        ));
        assert!(ConfigValidator::validate_endpoint("proxy.local", 1080).is_ok());
    }
}

//! Proxy settings
//!
//! Loading, defaults and validation for the values a tunnel client is
//! constructed from, typically sourced from persisted connection records.

use std::time::Duration;

pub mod defaults;
pub mod proxy_url;
pub mod settings;
pub mod validation;

pub use settings::ProxySettings;
pub use validation::{ConfigError, ConfigResult, ConfigValidator, Validator};

/// TCP connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpConfig {
    pub nodelay: bool,
    pub keepalive: Option<Duration>,
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            nodelay: true,
            keepalive: None,
        }
    }
}

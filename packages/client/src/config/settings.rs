//! Persisted proxy settings

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TcpConfig;
use super::defaults::default_timeout_ms;
use super::validation::{ConfigResult, ConfigValidator, Validator};
use crate::connect::proxy::{ProxyCredentials, ProxyEndpoint, ProxyKind};

/// Everything needed to build a tunnel client for one connection record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxySettings {
    pub kind: ProxyKind,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Applied to proxy connect and every handshake read and write
    pub timeout_ms: u64,
    pub tcp_keepalive_secs: Option<u64>,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            kind: ProxyKind::None,
            host: String::new(),
            port: 0,
            username: String::new(),
            password: String::new(),
            timeout_ms: default_timeout_ms(),
            tcp_keepalive_secs: None,
        }
    }
}

impl ProxySettings {
    pub fn new(kind: ProxyKind, host: impl Into<String>, port: u16) -> Self {
        Self {
            kind,
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the per-operation handshake timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn with_keepalive(mut self, keepalive: Duration) -> Self {
        self.tcp_keepalive_secs = Some(keepalive.as_secs());
        self
    }

    /// Load settings from a JSON document and validate them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` for malformed documents and any
    /// validation error for well-formed but unusable settings.
    pub fn from_json(document: &str) -> ConfigResult<Self> {
        let settings: ProxySettings = serde_json::from_str(document)?;
        settings.validate()?;
        Ok(settings)
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn endpoint(&self) -> ProxyEndpoint {
        ProxyEndpoint::new(self.host.clone(), self.port)
    }

    #[must_use]
    pub fn credentials(&self) -> ProxyCredentials {
        ProxyCredentials::new(self.username.clone(), self.password.clone())
    }

    #[must_use]
    pub fn tcp_config(&self) -> TcpConfig {
        TcpConfig {
            nodelay: true,
            keepalive: self.tcp_keepalive_secs.map(Duration::from_secs),
        }
    }
}

impl Validator for ProxySettings {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.timeout(), "timeout")?;
        if self.kind != ProxyKind::None {
            ConfigValidator::validate_endpoint(&self.host, self.port)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ProxySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxySettings")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("tcp_keepalive_secs", &self.tcp_keepalive_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn test_from_json_with_legacy_kind() {
        let settings = ProxySettings::from_json(
            r#"{"kind":"ProxySocks5","host":"proxy.local","port":1080,"username":"alice","password":"pw"}"#,
        )
        .expect("settings should load");

        assert_eq!(settings.kind, ProxyKind::Socks5);
        assert_eq!(settings.endpoint(), ProxyEndpoint::new("proxy.local", 1080));
        assert!(settings.credentials().is_present());
        assert_eq!(settings.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_from_json_defaults_to_no_proxy() {
        let settings = ProxySettings::from_json("{}").expect("empty document is valid");
        assert_eq!(settings.kind, ProxyKind::None);
        assert!(!settings.credentials().is_present());
    }

    #[test]
    fn test_from_json_rejects_missing_host() {
        let err = ProxySettings::from_json(r#"{"kind":"http","port":8080}"#)
            .expect_err("http proxy without host must fail");
        assert!(matches!(err, ConfigError::MissingHost));
    }

    #[test]
    fn test_from_json_rejects_zero_timeout() {
        let err = ProxySettings::from_json(r#"{"timeoutMs":0}"#)
            .expect_err("zero timeout must fail");
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let err = ProxySettings::from_json(r#"{"kind":"ProxyUltra","host":"h","port":1}"#)
            .expect_err("repeater mode is not a tunnel");
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_serialize_uses_short_kind_name() {
        let settings = ProxySettings::new(ProxyKind::Http, "proxy.local", 3128);
        let json = serde_json::to_string(&settings).expect("settings serialize");
        assert!(json.contains(r#""kind":"http""#));
    }

    #[test]
    fn test_keepalive_flows_into_tcp_config() {
        let settings = ProxySettings::new(ProxyKind::Socks5, "proxy.local", 1080)
            .with_keepalive(Duration::from_secs(45));

        let tcp = settings.tcp_config();
        assert_eq!(tcp.keepalive, Some(Duration::from_secs(45)));
        assert!(tcp.nodelay);
        assert_eq!(ProxySettings::default().tcp_config().keepalive, None);
    }
}

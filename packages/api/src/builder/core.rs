//! Core `TunnelBuilder` structure and connection entry points

use std::net::TcpStream;
use std::time::Duration;

use proxytunnel_client::config::defaults::DEFAULT_TIMEOUT_MS;
use proxytunnel_client::config::{ConfigValidator, Validator};
use proxytunnel_client::connect::connect_with_timeout;
use proxytunnel_client::{
    Destination, Error, ProxyClient, ProxyCredentials, ProxyEndpoint, ProxyKind, ProxySettings,
    Result, TcpConfig, TcpDialer, TunnelClient,
};

/// Fluent builder for proxy tunnels
///
/// Holds only immutable configuration once built; every `connect` call
/// dials its own socket.
#[derive(Clone, Debug)]
pub struct TunnelBuilder {
    pub(crate) kind: ProxyKind,
    pub(crate) endpoint: Option<ProxyEndpoint>,
    pub(crate) credentials: ProxyCredentials,
    pub(crate) timeout: Duration,
    pub(crate) tcp: TcpConfig,
}

impl TunnelBuilder {
    #[must_use]
    pub fn new(kind: ProxyKind, endpoint: ProxyEndpoint) -> Self {
        Self {
            kind,
            endpoint: Some(endpoint),
            credentials: ProxyCredentials::none(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            tcp: TcpConfig::default(),
        }
    }

    /// Builder that bypasses proxying entirely
    #[must_use]
    pub fn direct() -> Self {
        Self {
            kind: ProxyKind::None,
            endpoint: None,
            credentials: ProxyCredentials::none(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            tcp: TcpConfig::default(),
        }
    }

    /// Start from persisted settings
    ///
    /// # Errors
    ///
    /// Returns `Kind::Builder` when the settings do not validate.
    pub fn from_settings(settings: &ProxySettings) -> Result<Self> {
        settings.validate()?;

        let mut builder = if settings.kind == ProxyKind::None {
            Self::direct()
        } else {
            Self::new(settings.kind, settings.endpoint())
        };
        builder.credentials = settings.credentials();
        builder.timeout = settings.timeout();
        builder.tcp = settings.tcp_config();
        Ok(builder)
    }

    /// Set the timeout applied to the proxy connect and to every
    /// handshake read and write
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Same as [`TunnelBuilder::timeout`], in milliseconds
    #[must_use]
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Enable TCP keepalive on the proxy connection
    #[must_use]
    pub fn keepalive(mut self, keepalive: Duration) -> Self {
        self.tcp.keepalive = Some(keepalive);
        self
    }

    #[must_use]
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.tcp.nodelay = nodelay;
        self
    }

    #[must_use]
    pub fn kind(&self) -> ProxyKind {
        self.kind
    }

    /// The tunnel client these settings produce; `None` for direct builders
    #[must_use]
    pub fn client(&self) -> Option<TunnelClient> {
        let endpoint = self.endpoint.clone()?;
        TunnelClient::create(self.kind, endpoint, self.credentials.clone())
    }

    /// Open a stream to `host:port`, through the proxy unless this is a
    /// direct builder.
    ///
    /// # Errors
    ///
    /// Any handshake error; the socket is already closed when it is returned.
    pub fn connect(&self, host: &str, port: u16) -> Result<TcpStream> {
        ConfigValidator::validate_timeout(self.timeout, "timeout").map_err(Error::from)?;

        match self.client() {
            Some(client) => client.connect_with(
                &TcpDialer::new(self.tcp.clone()),
                &Destination::new(host, port),
                self.timeout,
            ),
            None => {
                tracing::debug!("no proxy configured, connecting directly to {}:{}", host, port);
                connect_with_timeout(host, port, self.timeout, &self.tcp)
            }
        }
    }
}

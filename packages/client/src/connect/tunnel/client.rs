use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use super::dialer::{Dialer, TcpDialer};
use super::http_connect::HttpConnectClient;
use super::socks4::Socks4Client;
use super::socks5::Socks5Client;
use crate::config::ProxySettings;
use crate::connect::proxy::{Destination, ProxyCredentials, ProxyEndpoint, ProxyKind};
use crate::error::Result;

/// Establishes a tunnel to a destination through one proxy.
///
/// Implementors hold only immutable configuration, so a client can serve
/// any number of sequential or concurrent `connect` calls. Each call owns
/// its stream until it is handed back; on failure the stream is dropped,
/// closing it, before the error is returned.
pub trait ProxyClient {
    fn kind(&self) -> ProxyKind;

    fn endpoint(&self) -> &ProxyEndpoint;

    /// Checks that must pass before a socket is opened.
    fn preflight(&self, _destination: &Destination) -> Result<()> {
        Ok(())
    }

    /// Run the protocol exchange on an already connected stream, leaving it
    /// positioned at the first byte of tunneled payload.
    fn handshake<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()>;

    /// Dial the proxy through `dialer` and run the handshake.
    fn connect_with<D: Dialer>(
        &self,
        dialer: &D,
        destination: &Destination,
        timeout: Duration,
    ) -> Result<D::Stream> {
        let endpoint = self.endpoint();
        self.preflight(destination)
            .map_err(|e| e.with_proxy(endpoint))?;

        tracing::debug!("dialing {} proxy {} for {}", self.kind(), endpoint, destination);
        let mut stream = dialer
            .dial(endpoint, timeout)
            .map_err(|e| e.with_proxy(endpoint))?;

        match self.handshake(&mut stream, destination) {
            Ok(()) => {
                tracing::debug!("tunnel to {} through {} established", destination, endpoint);
                Ok(stream)
            }
            Err(e) => {
                tracing::warn!(
                    "{} handshake with {} failed, closing connection: {}",
                    self.kind(),
                    endpoint,
                    e
                );
                drop(stream);
                Err(e.with_proxy(endpoint))
            }
        }
    }

    /// Connect to `host:port` through the proxy over TCP.
    fn connect(&self, host: &str, port: u16, timeout: Duration) -> Result<TcpStream> {
        self.connect_with(&TcpDialer::default(), &Destination::new(host, port), timeout)
    }
}

/// One of the supported tunnel clients.
#[derive(Clone, Debug)]
pub enum TunnelClient {
    Http(HttpConnectClient),
    Socks4(Socks4Client),
    Socks5(Socks5Client),
}

impl TunnelClient {
    /// Build the client for `kind`. `ProxyKind::None` yields no client;
    /// callers connect directly in that case.
    #[must_use]
    pub fn create(kind: ProxyKind, endpoint: ProxyEndpoint, credentials: ProxyCredentials) -> Option<Self> {
        match kind {
            ProxyKind::None => None,
            ProxyKind::Http => Some(TunnelClient::Http(HttpConnectClient::new(endpoint, credentials))),
            ProxyKind::Socks4 => Some(TunnelClient::Socks4(Socks4Client::new(endpoint, credentials.username))),
            ProxyKind::Socks5 => Some(TunnelClient::Socks5(Socks5Client::new(endpoint, credentials))),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &ProxySettings) -> Option<Self> {
        Self::create(settings.kind, settings.endpoint(), settings.credentials())
    }
}

impl ProxyClient for TunnelClient {
    fn kind(&self) -> ProxyKind {
        match self {
            TunnelClient::Http(client) => client.kind(),
            TunnelClient::Socks4(client) => client.kind(),
            TunnelClient::Socks5(client) => client.kind(),
        }
    }

    fn endpoint(&self) -> &ProxyEndpoint {
        match self {
            TunnelClient::Http(client) => client.endpoint(),
            TunnelClient::Socks4(client) => client.endpoint(),
            TunnelClient::Socks5(client) => client.endpoint(),
        }
    }

    fn preflight(&self, destination: &Destination) -> Result<()> {
        match self {
            TunnelClient::Http(client) => client.preflight(destination),
            TunnelClient::Socks4(client) => client.preflight(destination),
            TunnelClient::Socks5(client) => client.preflight(destination),
        }
    }

    fn handshake<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()> {
        match self {
            TunnelClient::Http(client) => client.handshake(stream, destination),
            TunnelClient::Socks4(client) => client.handshake(stream, destination),
            TunnelClient::Socks5(client) => client.handshake(stream, destination),
        }
    }
}

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Which tunnel protocol to speak to the proxy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum ProxyKind {
    /// Connect directly; no tunnel handshake is performed
    #[default]
    None,
    Http,
    Socks4,
    Socks5,
}

impl ProxyKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyKind::None => "none",
            ProxyKind::Http => "http",
            ProxyKind::Socks4 => "socks4",
            ProxyKind::Socks5 => "socks5",
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProxyKind {
    type Err = ConfigError;

    /// Accepts the short names and the persisted `Proxy*` names of stored
    /// connection records, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "proxynone" | "" => Ok(ProxyKind::None),
            "http" | "proxyhttp" => Ok(ProxyKind::Http),
            "socks4" | "socks4a" | "proxysocks4" => Ok(ProxyKind::Socks4),
            "socks5" | "proxysocks5" => Ok(ProxyKind::Socks5),
            _ => Err(ConfigError::UnknownProxyKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for ProxyKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProxyKind> for &'static str {
    fn from(kind: ProxyKind) -> Self {
        kind.as_str()
    }
}

/// Writes `host:port`, bracketing IPv6 literals.
fn write_authority(f: &mut fmt::Formatter<'_>, host: &str, port: u16) -> fmt::Result {
    if host.contains(':') && !host.starts_with('[') {
        write!(f, "[{host}]:{port}")
    } else {
        write!(f, "{host}:{port}")
    }
}

/// Address of the intermediary proxy.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
}

impl ProxyEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for ProxyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_authority(f, &self.host, self.port)
    }
}

/// Credentials offered to the proxy. An empty username means no
/// authentication is requested.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: String,
}

impl ProxyCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.username.is_empty()
    }
}

impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Final target of a tunnel. Supplied per call, never stored on a client.
///
/// Host names go on the wire as their UTF-8 bytes; non-ASCII is not replaced.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

/// How a destination host is put on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestinationAddr<'a> {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
    Domain(&'a str),
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Classify the host once: IP literals use the binary encoding,
    /// anything else is sent as a domain name.
    #[must_use]
    pub fn addr(&self) -> DestinationAddr<'_> {
        let literal = self
            .host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host);

        match IpAddr::from_str(literal) {
            Ok(IpAddr::V4(v4)) => DestinationAddr::V4(v4),
            Ok(IpAddr::V6(v6)) => DestinationAddr::V6(v6),
            Err(_) => DestinationAddr::Domain(&self.host),
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_authority(f, &self.host, self.port)
    }
}

use std::io::{Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use crate::config::TcpConfig;
use crate::connect::proxy::ProxyEndpoint;
use crate::connect::tcp::connect_with_timeout;
use crate::error::Result;

/// Opens the raw transport to a proxy.
pub trait Dialer {
    type Stream: Read + Write;

    /// Connect to `endpoint`. Implementations apply `timeout` to the connect
    /// and to every later read and write on the returned stream.
    fn dial(&self, endpoint: &ProxyEndpoint, timeout: Duration) -> Result<Self::Stream>;
}

/// Dials proxies over TCP.
#[derive(Debug, Clone, Default)]
pub struct TcpDialer {
    tcp: TcpConfig,
}

impl TcpDialer {
    #[must_use]
    pub fn new(tcp: TcpConfig) -> Self {
        Self { tcp }
    }
}

impl Dialer for TcpDialer {
    type Stream = TcpStream;

    fn dial(&self, endpoint: &ProxyEndpoint, timeout: Duration) -> Result<TcpStream> {
        connect_with_timeout(&endpoint.host, endpoint.port, timeout, &self.tcp)
    }
}

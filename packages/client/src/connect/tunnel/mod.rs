//! Proxy tunnel clients
//!
//! HTTP CONNECT, SOCKS4/4a and SOCKS5 handshakes behind one contract.
//! Handshakes are generic over `Read + Write`; dialing goes through the
//! [`Dialer`] seam so a real TCP socket is only one possible transport.

mod client;
mod dialer;
mod http_connect;
mod socks4;
mod socks5;

#[cfg(test)]
pub(crate) mod mock;

pub use client::{ProxyClient, TunnelClient};
pub use dialer::{Dialer, TcpDialer};
pub use http_connect::HttpConnectClient;
pub use socks4::Socks4Client;
pub use socks5::Socks5Client;

//! Proxy tunnel establishment
//!
//! Blocking, per-call stateless tunnel handshakes over TCP.

pub mod proxy;
pub mod tcp;
pub mod tunnel;

pub use proxy::{Destination, DestinationAddr, ProxyCredentials, ProxyEndpoint, ProxyKind};
pub use tcp::{
    LoopbackPortValidator, PortValidator, configure_tcp_socket, connect_to_address_list,
    connect_with_timeout, read_array, read_exact, read_until, resolve_host_sync,
};
pub use tunnel::{
    Dialer, HttpConnectClient, ProxyClient, Socks4Client, Socks5Client, TcpDialer, TunnelClient,
};

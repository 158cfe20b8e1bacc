//! Canonical types for callers of the tunnel clients

pub use crate::config::{ConfigError, ProxySettings, TcpConfig};
pub use crate::connect::{
    Destination, Dialer, ProxyClient, ProxyCredentials, ProxyEndpoint, ProxyKind, TcpDialer,
    TunnelClient,
};
pub use crate::error::{Error, Kind, Rejection, Result};

//! Proxy data model
//!
//! The values a tunnel attempt is built from: which protocol to speak, where
//! the proxy lives, what credentials to offer and where the tunnel should end.

mod types;

pub use types::{Destination, DestinationAddr, ProxyCredentials, ProxyEndpoint, ProxyKind};

//! Host resolution with an IP-literal fast path

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use crate::error::{self, Result};

/// Resolve hostname to socket addresses synchronously.
pub fn resolve_host_sync(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    let literal = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);

    // Fast path for IP addresses
    if let Ok(ip) = IpAddr::from_str(literal) {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    match (literal, port).to_socket_addrs() {
        Ok(addrs) => {
            let addr_vec: Vec<SocketAddr> = addrs.collect();
            if addr_vec.is_empty() {
                Err(error::connect(format!("No addresses resolved for {host}")))
            } else {
                Ok(addr_vec)
            }
        }
        Err(e) => Err(error::connect(format!("DNS resolution failed for {host}: {e}"))),
    }
}

//! Proxy dialing under a deadline

use std::io;
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use super::dns_resolution::resolve_host_sync;
use super::socket_config::configure_tcp_socket;
use crate::config::TcpConfig;
use crate::error::{self, Result};

/// Connect to first available address, each attempt bounded by `timeout`.
pub fn connect_to_address_list(addrs: &[SocketAddr], timeout: Duration) -> Result<TcpStream> {
    if addrs.is_empty() {
        return Err(error::connect("No addresses to connect to"));
    }

    let mut last_error: Option<io::Error> = None;
    let mut all_timed_out = true;

    for addr in addrs {
        match TcpStream::connect_timeout(addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!("Failed to connect to {}: {}", addr, e);
                all_timed_out &= matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock);
                last_error = Some(e);
            }
        }
    }

    match last_error {
        Some(e) if all_timed_out => Err(error::timeout(e)),
        Some(e) => Err(error::connect(e)),
        None => Err(error::connect("Failed to connect to any address")),
    }
}

/// Open a TCP connection to `host:port` and prepare it for a handshake.
///
/// Every resolved address gets the full `timeout`. The returned stream has
/// its read and write deadlines set to `timeout`. If socket setup fails the
/// stream is dropped, and so closed, before the error is returned.
pub fn connect_with_timeout(
    host: &str,
    port: u16,
    timeout: Duration,
    tcp: &TcpConfig,
) -> Result<TcpStream> {
    if timeout.is_zero() {
        return Err(error::builder("timeout cannot be zero"));
    }

    let addrs = resolve_host_sync(host, port)?;
    let stream = connect_to_address_list(&addrs, timeout).map_err(|e| {
        if e.is_timeout() {
            error::timeout(format!("Timed out connecting to proxy {host}:{port}"))
        } else {
            e
        }
    })?;

    configure_tcp_socket(&stream, tcp, timeout)?;
    Ok(stream)
}

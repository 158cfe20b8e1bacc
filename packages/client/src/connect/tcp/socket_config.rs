//! TCP socket configuration for handshakes

use std::net::TcpStream;
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};

use crate::config::TcpConfig;
use crate::error::Result;

/// Apply nodelay, keepalive and the per-operation read/write deadline.
pub fn configure_tcp_socket(stream: &TcpStream, tcp: &TcpConfig, timeout: Duration) -> Result<()> {
    stream.set_nodelay(tcp.nodelay)?;
    stream.set_read_timeout(Some(timeout))?;
    stream.set_write_timeout(Some(timeout))?;

    if let Some(duration) = tcp.keepalive {
        let keepalive = TcpKeepalive::new().with_time(duration);
        SockRef::from(stream).set_tcp_keepalive(&keepalive)?;
        tracing::trace!("TCP keepalive set to {:?}", duration);
    }

    Ok(())
}

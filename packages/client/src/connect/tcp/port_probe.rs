//! Loopback port probing
//!
//! Local port forwards (an SSH tunnel's listening end, for example) take a
//! moment to come up. The probe retries a loopback connect until the port
//! answers or the wait budget runs out.

use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::thread;
use std::time::{Duration, Instant};

/// Checks that something is accepting connections on a local port.
pub trait PortValidator {
    fn validate_port(&self, port: u16) -> bool;
}

#[derive(Debug, Clone)]
pub struct LoopbackPortValidator {
    /// Total time to keep retrying
    pub wait: Duration,
    /// Pause between attempts, also the per-attempt connect timeout
    pub retry_interval: Duration,
}

impl Default for LoopbackPortValidator {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(5),
            retry_interval: Duration::from_millis(500),
        }
    }
}

impl PortValidator for LoopbackPortValidator {
    fn validate_port(&self, port: u16) -> bool {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        let attempt_timeout = self.retry_interval.max(Duration::from_millis(1));
        let start = Instant::now();

        while start.elapsed() < self.wait {
            match TcpStream::connect_timeout(&addr, attempt_timeout) {
                Ok(_) => return true,
                Err(e) => {
                    tracing::trace!("port {} not ready: {}", port, e);
                    thread::sleep(self.retry_interval);
                }
            }
        }

        tracing::debug!("port {} did not accept connections within {:?}", port, self.wait);
        false
    }
}

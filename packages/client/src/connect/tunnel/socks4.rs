//! SOCKS4 and SOCKS4a tunnels

use std::io::{Read, Write};

use super::client::ProxyClient;
use crate::connect::proxy::{Destination, DestinationAddr, ProxyEndpoint, ProxyKind};
use crate::connect::tcp::read_array;
use crate::error::{self, Rejection, Result};

const SOCKS4_VERSION: u8 = 0x04;
const CMD_CONNECT: u8 = 0x01;
const REPLY_GRANTED: u8 = 0x5A;

/// Address 0.0.0.1 tells a SOCKS4a proxy a host name follows the user id.
const SOCKS4A_MARKER: [u8; 4] = [0x00, 0x00, 0x00, 0x01];

#[derive(Clone, Debug)]
pub struct Socks4Client {
    endpoint: ProxyEndpoint,
    user_id: String,
}

impl Socks4Client {
    #[must_use]
    pub fn new(endpoint: ProxyEndpoint, user_id: impl Into<String>) -> Self {
        Self {
            endpoint,
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Encode the CONNECT request for `destination`.
    ///
    /// IPv4 literals use plain SOCKS4. Anything else, IPv6 literals included,
    /// is sent by name through the SOCKS4a extension.
    #[must_use]
    pub fn connect_request(&self, destination: &Destination) -> Vec<u8> {
        let mut request = Vec::with_capacity(10 + self.user_id.len() + destination.host.len());
        request.push(SOCKS4_VERSION);
        request.push(CMD_CONNECT);
        request.extend_from_slice(&destination.port.to_be_bytes());

        match destination.addr() {
            DestinationAddr::V4(ip) => {
                request.extend_from_slice(&ip.octets());
                request.extend_from_slice(self.user_id.as_bytes());
                request.push(0x00);
            }
            DestinationAddr::V6(_) | DestinationAddr::Domain(_) => {
                request.extend_from_slice(&SOCKS4A_MARKER);
                request.extend_from_slice(self.user_id.as_bytes());
                request.push(0x00);
                request.extend_from_slice(destination.host.as_bytes());
                request.push(0x00);
            }
        }

        request
    }
}

impl ProxyClient for Socks4Client {
    fn kind(&self) -> ProxyKind {
        ProxyKind::Socks4
    }

    fn endpoint(&self) -> &ProxyEndpoint {
        &self.endpoint
    }

    fn handshake<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()> {
        let request = self.connect_request(destination);
        tracing::debug!("sending SOCKS4 CONNECT for {}", destination);
        stream.write_all(&request)?;
        stream.flush()?;

        let response: [u8; 8] = read_array(stream)?;
        if response[1] != REPLY_GRANTED {
            return Err(error::rejected(Rejection::Socks4 { status: response[1] }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::tunnel::mock::MockStream;
    use crate::error::Kind;

    fn client(user_id: &str) -> Socks4Client {
        Socks4Client::new(ProxyEndpoint::new("proxy.local", 1080), user_id)
    }

    #[test]
    fn test_ipv4_request_has_no_hostname() {
        let request = client("").connect_request(&Destination::new("93.184.216.34", 80));
        assert_eq!(request, vec![0x04, 0x01, 0x00, 0x50, 93, 184, 216, 34, 0x00]);
    }

    #[test]
    fn test_domain_request_uses_socks4a() {
        let request = client("bob").connect_request(&Destination::new("example.com", 80));

        let mut expected = vec![0x04, 0x01, 0x00, 0x50, 0x00, 0x00, 0x00, 0x01];
        expected.extend_from_slice(b"bob\0example.com\0");
        assert_eq!(request, expected);
    }

    #[test]
    fn test_ipv6_literal_is_sent_by_name() {
        let request = client("").connect_request(&Destination::new("::1", 22));
        assert_eq!(&request[4..8], &SOCKS4A_MARKER);
        assert!(request.ends_with(b"\0::1\0"));
    }

    #[test]
    fn test_granted_reply() {
        let mut stream = MockStream::new(&[0x00, 0x5A, 0, 0, 0, 0, 0, 0, 0xAB]);
        client("")
            .handshake(&mut stream, &Destination::new("93.184.216.34", 80))
            .expect("0x5A grants the tunnel");
        assert_eq!(stream.remaining(), &[0xAB]);
    }

    #[test]
    fn test_rejected_reply_carries_status() {
        let mut stream = MockStream::new(&[0x04, 0x5B, 0, 0, 0, 0, 0, 0]);
        let err = client("")
            .handshake(&mut stream, &Destination::new("93.184.216.34", 80))
            .expect_err("0x5B is a rejection");
        assert_eq!(err.kind(), &Kind::ProxyRejected(Rejection::Socks4 { status: 0x5B }));
    }

    #[test]
    fn test_short_reply_is_eof() {
        let mut stream = MockStream::new(&[0x00, 0x5A, 0x00]);
        let err = client("")
            .handshake(&mut stream, &Destination::new("example.com", 80))
            .expect_err("reply shorter than 8 bytes");
        assert!(err.is_eof());
    }
}

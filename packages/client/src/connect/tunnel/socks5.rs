//! SOCKS5 tunnels (RFC 1928, RFC 1929)
//!
//! Three phases run strictly in order on every call: method greeting,
//! optional username/password sub-negotiation, then the CONNECT request
//! and its variable-length reply.

use std::io::{Read, Write};

use super::client::ProxyClient;
use crate::connect::proxy::{Destination, DestinationAddr, ProxyCredentials, ProxyEndpoint, ProxyKind};
use crate::connect::tcp::{read_array, read_exact};
use crate::error::{self, Rejection, Result};

const SOCKS5_VERSION: u8 = 0x05;
const CMD_CONNECT: u8 = 0x01;
const RESERVED: u8 = 0x00;

const METHOD_NO_AUTH: u8 = 0x00;
const METHOD_USERNAME_PASSWORD: u8 = 0x02;
const METHOD_NO_ACCEPTABLE: u8 = 0xFF;

const AUTH_VERSION: u8 = 0x01;
const AUTH_SUCCESS: u8 = 0x00;

const ATYP_IPV4: u8 = 0x01;
const ATYP_DOMAIN: u8 = 0x03;
const ATYP_IPV6: u8 = 0x04;

const REPLY_SUCCEEDED: u8 = 0x00;

#[derive(Clone, Debug)]
pub struct Socks5Client {
    endpoint: ProxyEndpoint,
    credentials: ProxyCredentials,
}

impl Socks5Client {
    #[must_use]
    pub fn new(endpoint: ProxyEndpoint, credentials: ProxyCredentials) -> Self {
        Self { endpoint, credentials }
    }

    /// No-auth is always offered, so the proxy may skip authentication even
    /// when credentials are configured.
    #[must_use]
    pub fn greeting(&self) -> Vec<u8> {
        if self.credentials.is_present() {
            vec![SOCKS5_VERSION, 2, METHOD_NO_AUTH, METHOD_USERNAME_PASSWORD]
        } else {
            vec![SOCKS5_VERSION, 1, METHOD_NO_AUTH]
        }
    }

    fn auth_request(&self) -> Result<Vec<u8>> {
        let username = self.credentials.username.as_bytes();
        let password = self.credentials.password.as_bytes();

        let ulen = u8::try_from(username.len())
            .map_err(|_| error::credentials_too_long("SOCKS5 username exceeds 255 bytes"))?;
        let plen = u8::try_from(password.len())
            .map_err(|_| error::credentials_too_long("SOCKS5 password exceeds 255 bytes"))?;

        let mut request = Vec::with_capacity(3 + username.len() + password.len());
        request.push(AUTH_VERSION);
        request.push(ulen);
        request.extend_from_slice(username);
        request.push(plen);
        request.extend_from_slice(password);
        Ok(request)
    }

    /// Encode the CONNECT request for `destination`.
    ///
    /// # Errors
    ///
    /// `HostnameTooLong` when a domain destination exceeds 255 bytes.
    pub fn connect_request(&self, destination: &Destination) -> Result<Vec<u8>> {
        let mut request = vec![SOCKS5_VERSION, CMD_CONNECT, RESERVED];

        match destination.addr() {
            DestinationAddr::V4(ip) => {
                request.push(ATYP_IPV4);
                request.extend_from_slice(&ip.octets());
            }
            DestinationAddr::V6(ip) => {
                request.push(ATYP_IPV6);
                request.extend_from_slice(&ip.octets());
            }
            DestinationAddr::Domain(host) => {
                let len = u8::try_from(host.len()).map_err(|_| error::hostname_too_long(host.len()))?;
                request.push(ATYP_DOMAIN);
                request.push(len);
                request.extend_from_slice(host.as_bytes());
            }
        }

        request.extend_from_slice(&destination.port.to_be_bytes());
        Ok(request)
    }

    fn negotiate_method<S: Read + Write>(&self, stream: &mut S) -> Result<()> {
        tracing::debug!("sending SOCKS5 greeting to {}", self.endpoint);
        stream.write_all(&self.greeting())?;
        stream.flush()?;

        let [version, method]: [u8; 2] = read_array(stream)?;
        if version != SOCKS5_VERSION {
            return Err(error::protocol_violation(format!(
                "SOCKS5 proxy returned an invalid protocol version 0x{version:02X}"
            )));
        }

        match method {
            METHOD_NO_AUTH => Ok(()),
            METHOD_USERNAME_PASSWORD => self.authenticate(stream),
            METHOD_NO_ACCEPTABLE => Err(error::no_acceptable_auth_method()),
            other => Err(error::protocol_violation(format!(
                "SOCKS5 proxy selected unsupported auth method 0x{other:02X}"
            ))),
        }
    }

    fn authenticate<S: Read + Write>(&self, stream: &mut S) -> Result<()> {
        let request = self.auth_request()?;
        tracing::debug!("authenticating to SOCKS5 proxy {}", self.endpoint);
        stream.write_all(&request)?;
        stream.flush()?;

        let [_, status]: [u8; 2] = read_array(stream)?;
        if status != AUTH_SUCCESS {
            return Err(error::authentication_failed(status));
        }
        Ok(())
    }

    fn request_connect<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()> {
        let request = self.connect_request(destination)?;
        tracing::debug!("sending SOCKS5 CONNECT for {}", destination);
        stream.write_all(&request)?;
        stream.flush()?;

        let [version, reply, _, atyp]: [u8; 4] = read_array(stream)?;
        if version != SOCKS5_VERSION {
            return Err(error::protocol_violation(format!(
                "SOCKS5 proxy returned an invalid protocol version 0x{version:02X} for CONNECT response"
            )));
        }
        if reply != REPLY_SUCCEEDED {
            return Err(error::rejected(Rejection::Socks5 { reply }));
        }

        let address_len = match atyp {
            ATYP_IPV4 => 4,
            ATYP_IPV6 => 16,
            ATYP_DOMAIN => {
                let [len]: [u8; 1] = read_array(stream)?;
                usize::from(len)
            }
            other => {
                return Err(error::protocol_violation(format!(
                    "SOCKS5 proxy returned unsupported address type 0x{other:02X}"
                )));
            }
        };

        // The bound address is of no use here, but it has to be drained so
        // the stream starts at tunneled payload.
        let bound = read_exact(stream, address_len + 2)?;
        tracing::trace!("discarded {} bytes of SOCKS5 bound address", bound.len());
        Ok(())
    }
}

impl ProxyClient for Socks5Client {
    fn kind(&self) -> ProxyKind {
        ProxyKind::Socks5
    }

    fn endpoint(&self) -> &ProxyEndpoint {
        &self.endpoint
    }

    fn preflight(&self, destination: &Destination) -> Result<()> {
        if self.credentials.is_present() {
            self.auth_request()?;
        }
        self.connect_request(destination).map(|_| ())
    }

    fn handshake<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()> {
        self.negotiate_method(stream)?;
        self.request_connect(stream, destination)
    }
}

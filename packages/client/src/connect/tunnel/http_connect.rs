//! HTTP CONNECT tunnels
//!
//! Asks an HTTP proxy to open a raw pipe with
//! `CONNECT host:port HTTP/1.1`, optionally with Basic proxy
//! authorization, and accepts nothing but a `200` status.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::client::ProxyClient;
use crate::config::defaults::MAX_HTTP_RESPONSE_BYTES;
use crate::connect::proxy::{Destination, ProxyCredentials, ProxyEndpoint, ProxyKind};
use crate::connect::tcp::read_until;
use crate::error::{self, Rejection, Result};

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Clone, Debug)]
pub struct HttpConnectClient {
    endpoint: ProxyEndpoint,
    credentials: ProxyCredentials,
}

impl HttpConnectClient {
    #[must_use]
    pub fn new(endpoint: ProxyEndpoint, credentials: ProxyCredentials) -> Self {
        Self { endpoint, credentials }
    }

    /// The request head sent to the proxy, blank line included.
    #[must_use]
    pub fn connect_request(&self, destination: &Destination) -> String {
        let target = destination.to_string();

        let mut request = format!(
            "CONNECT {target} HTTP/1.1\r\nHost: {target}\r\nProxy-Connection: Keep-Alive\r\n"
        );

        if self.credentials.is_present() {
            let credentials = format!("{}:{}", self.credentials.username, self.credentials.password);
            request.push_str("Proxy-Authorization: Basic ");
            request.push_str(&STANDARD.encode(credentials));
            request.push_str("\r\n");
        }

        request.push_str("\r\n");
        request
    }
}

/// Accept only a status line whose second token is exactly `200`.
pub(crate) fn validate_response(response: &[u8]) -> Result<()> {
    let text = String::from_utf8_lossy(response);
    let status_line = text.split("\r\n").next().unwrap_or_default();

    let mut parts = status_line.split(' ').filter(|part| !part.is_empty());
    let code = parts.nth(1);

    if code == Some("200") {
        Ok(())
    } else {
        Err(error::rejected(Rejection::Http {
            status_line: status_line.to_string(),
        }))
    }
}

impl ProxyClient for HttpConnectClient {
    fn kind(&self) -> ProxyKind {
        ProxyKind::Http
    }

    fn endpoint(&self) -> &ProxyEndpoint {
        &self.endpoint
    }

    fn handshake<S: Read + Write>(&self, stream: &mut S, destination: &Destination) -> Result<()> {
        let request = self.connect_request(destination);
        tracing::debug!("sending HTTP CONNECT for {}", destination);
        stream.write_all(request.as_bytes())?;
        stream.flush()?;

        // Anything after the blank line already belongs to the tunnel.
        let response = read_until(stream, HEADER_TERMINATOR, MAX_HTTP_RESPONSE_BYTES)?;
        tracing::trace!("HTTP CONNECT response head is {} bytes", response.len());

        validate_response(&response)
    }
}

use std::error::Error as StdError;
use std::io;

use http::StatusCode;

use super::types::{Error, Kind, Rejection};

impl Error {
    /// Returns true if the error is from invalid settings.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if the proxy itself could not be reached.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        matches!(self.inner.kind, Kind::Connect)
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if matches!(self.inner.kind, Kind::Timeout) {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if let Some(io) = err.downcast_ref::<io::Error>() {
                if io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            }
            source = err.source();
        }

        false
    }

    /// Returns true if the peer closed the stream mid-handshake.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self.inner.kind, Kind::UnexpectedEof)
    }

    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self.inner.kind, Kind::ProtocolViolation)
    }

    /// Returns true if the proxy declined the tunnel.
    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self.inner.kind, Kind::ProxyRejected(_))
    }

    /// Returns true if SOCKS5 authentication did not succeed.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::NoAcceptableAuthMethod | Kind::AuthenticationFailed
        )
    }

    /// Returns true if the error was raised before any bytes were sent.
    #[must_use]
    pub fn is_local_validation(&self) -> bool {
        matches!(
            self.inner.kind,
            Kind::Builder | Kind::CredentialsTooLong | Kind::HostnameTooLong
        )
    }

    /// The raw status the proxy declined with, if it did.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.inner.kind {
            Kind::ProxyRejected(rejection) => Some(rejection),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if an HTTP proxy declined the tunnel
    /// with a parseable status line.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match &self.inner.kind {
            Kind::ProxyRejected(Rejection::Http { status_line }) => status_line
                .split(' ')
                .filter(|part| !part.is_empty())
                .nth(1)
                .and_then(|code| StatusCode::from_bytes(code.as_bytes()).ok()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;

    #[test]
    fn test_status_parsed_from_http_rejection() {
        let err = error::rejected(Rejection::Http {
            status_line: "HTTP/1.1 407 Proxy Authentication Required".to_string(),
        });
        assert!(err.is_rejected());
        assert_eq!(err.status(), Some(StatusCode::PROXY_AUTHENTICATION_REQUIRED));
    }

    #[test]
    fn test_status_absent_for_malformed_line() {
        let err = error::rejected(Rejection::Http {
            status_line: "garbage".to_string(),
        });
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_io_timeouts_classify_as_timeout() {
        let err = Error::from(io::Error::new(io::ErrorKind::WouldBlock, "read deadline"));
        assert!(err.is_timeout());
        assert_eq!(err.kind(), &Kind::Timeout);

        let err = Error::from(io::Error::new(io::ErrorKind::UnexpectedEof, "closed"));
        assert!(err.is_eof());

        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert_eq!(err.kind(), &Kind::Io);
    }

    #[test]
    fn test_socks_rejections_render_hex_status() {
        let err = error::rejected(Rejection::Socks4 { status: 0x5B });
        assert_eq!(err.to_string(), "SOCKS4 proxy CONNECT failed with status 0x5B");

        let err = error::rejected(Rejection::Socks5 { reply: 0x05 });
        assert_eq!(
            err.to_string(),
            "SOCKS5 proxy CONNECT failed with status 0x05 (connection refused)"
        );
    }

    #[test]
    fn test_local_validation_kinds() {
        assert!(error::credentials_too_long("username").is_local_validation());
        assert!(error::hostname_too_long(300).is_local_validation());
        assert!(!error::unexpected_eof().is_local_validation());
    }
}

use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `proxytunnel_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while establishing a proxy tunnel.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    /// `host:port` of the proxy the attempt went through, if known.
    pub proxy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Invalid settings, caught before any socket exists
    Builder,
    /// The proxy could not be reached (refused, unresolvable, unroutable)
    Connect,
    /// A connect, read or write exceeded the configured deadline
    Timeout,
    /// The peer closed the stream before the expected byte count arrived
    UnexpectedEof,
    /// A delimiter-bounded read ran past its byte budget
    ResponseTooLarge { limit: usize },
    /// A reply broke the fixed structure of the protocol
    ProtocolViolation,
    /// SOCKS5 proxy refused every offered method
    NoAcceptableAuthMethod,
    /// SOCKS5 username/password sub-negotiation rejected
    AuthenticationFailed,
    /// The proxy understood the request and declined the tunnel
    ProxyRejected(Rejection),
    /// Username or password does not fit a one-byte length field
    CredentialsTooLong,
    /// Destination host does not fit a one-byte length field
    HostnameTooLong,
    /// Any other transport error during the handshake
    Io,
}

/// The raw status a proxy answered with when it declined a tunnel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    Http { status_line: String },
    Socks4 { status: u8 },
    Socks5 { reply: u8 },
}

impl Rejection {
    /// RFC 1928 meaning of a SOCKS5 reply code.
    #[must_use]
    pub fn socks5_reply_message(reply: u8) -> &'static str {
        match reply {
            0x01 => "general SOCKS server failure",
            0x02 => "connection not allowed by ruleset",
            0x03 => "network unreachable",
            0x04 => "host unreachable",
            0x05 => "connection refused",
            0x06 => "TTL expired",
            0x07 => "command not supported",
            0x08 => "address type not supported",
            _ => "unassigned reply code",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Http { status_line } => {
                write!(f, "HTTP proxy CONNECT failed: {status_line}")
            }
            Rejection::Socks4 { status } => {
                write!(f, "SOCKS4 proxy CONNECT failed with status 0x{status:02X}")
            }
            Rejection::Socks5 { reply } => write!(
                f,
                "SOCKS5 proxy CONNECT failed with status 0x{reply:02X} ({})",
                Rejection::socks5_reply_message(*reply)
            ),
        }
    }
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                proxy: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    /// Attach the proxy endpoint the failed attempt went through.
    #[must_use]
    pub fn with_proxy(mut self, proxy: impl fmt::Display) -> Error {
        self.inner.proxy = Some(proxy.to_string());
        self
    }

    #[must_use]
    pub fn kind(&self) -> &Kind {
        &self.inner.kind
    }

    /// The proxy endpoint associated with this error, if any
    #[must_use]
    pub fn proxy(&self) -> Option<&str> {
        self.inner.proxy.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("proxytunnel_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref proxy) = self.inner.proxy {
            f.field("proxy", proxy);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.kind {
            Kind::Builder => f.write_str("invalid proxy configuration")?,
            Kind::Connect => f.write_str("could not connect to proxy")?,
            Kind::Timeout => f.write_str("proxy operation timed out")?,
            Kind::UnexpectedEof => {
                f.write_str("unexpected end of stream while reading proxy response")?;
            }
            Kind::ResponseTooLarge { limit } => {
                write!(f, "proxy response exceeded maximum expected size of {limit} bytes")?;
            }
            Kind::ProtocolViolation => f.write_str("proxy protocol violation")?,
            Kind::NoAcceptableAuthMethod => {
                f.write_str("SOCKS5 proxy did not accept any authentication method")?;
            }
            Kind::AuthenticationFailed => {
                f.write_str("SOCKS5 proxy username/password authentication failed")?;
            }
            Kind::ProxyRejected(rejection) => write!(f, "{rejection}")?,
            Kind::CredentialsTooLong => f.write_str("proxy credentials too long")?,
            Kind::HostnameTooLong => f.write_str("destination host name too long")?,
            Kind::Io => f.write_str("proxy transport error")?,
        }

        if let Some(ref source) = self.inner.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

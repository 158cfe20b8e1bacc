use super::BoxError;
use super::types::{Error, Kind, Rejection};

/// Creates an `Error` for invalid settings.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}

/// Creates an `Error` for a proxy that could not be reached.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Creates an `Error` for an exceeded deadline.
pub fn timeout<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Timeout).with(e.into())
}

pub fn unexpected_eof() -> Error {
    Error::new(Kind::UnexpectedEof)
}

pub fn response_too_large(limit: usize) -> Error {
    Error::new(Kind::ResponseTooLarge { limit })
}

/// Creates an `Error` for a reply that broke the protocol structure.
pub fn protocol_violation<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::ProtocolViolation).with(e.into())
}

pub fn no_acceptable_auth_method() -> Error {
    Error::new(Kind::NoAcceptableAuthMethod)
}

pub fn authentication_failed(status: u8) -> Error {
    Error::new(Kind::AuthenticationFailed).with(format!("status 0x{status:02X}"))
}

/// Creates an `Error` for a proxy that declined the tunnel.
pub fn rejected(rejection: Rejection) -> Error {
    Error::new(Kind::ProxyRejected(rejection))
}

pub fn credentials_too_long<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::CredentialsTooLong).with(e.into())
}

pub fn hostname_too_long(len: usize) -> Error {
    Error::new(Kind::HostnameTooLong).with(format!("{len} bytes exceeds 255"))
}

/// Creates an `Error` for any other transport failure.
pub fn io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Io).with(e.into())
}

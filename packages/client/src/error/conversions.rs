use std::io;

use super::constructors;
use super::types::{Error, Kind};
use crate::config::ConfigError;

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        // Read/write deadlines surface as WouldBlock on unix and TimedOut on windows.
        match error.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::new(Kind::Timeout).with(error),
            io::ErrorKind::UnexpectedEof => Error::new(Kind::UnexpectedEof).with(error),
            _ => constructors::io(error),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(error: ConfigError) -> Self {
        Error::new(Kind::Builder).with(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_kind_mapping() {
        let err = Error::from(io::Error::from(io::ErrorKind::WouldBlock));
        assert!(err.is_timeout());

        let err = Error::from(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(err.is_eof());

        let err = Error::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert_eq!(err.kind(), &Kind::Io);
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_config_error_is_builder() {
        let err = Error::from(ConfigError::MissingHost);
        assert!(err.is_builder());
    }
}

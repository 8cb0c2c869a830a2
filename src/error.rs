//! Unified error type.

use std::fmt;

/// The error type returned by the service's fallible startup and I/O paths.
///
/// Request-level failures (400, 404, 415, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: reading configuration, binding to a port, or
/// accepting a connection.
#[derive(Debug)]
pub enum Error {
    /// Socket-level failure while binding or serving.
    Io(std::io::Error),
    /// A required environment variable is unset or empty.
    MissingEnv(&'static str),
    /// The configured listen address is not a valid `host:port`.
    InvalidAddr(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::MissingEnv(key) => write!(f, "required env var {key} not set"),
            Self::InvalidAddr(addr) => write!(f, "invalid socket address `{addr}`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::MissingEnv(_) | Self::InvalidAddr(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

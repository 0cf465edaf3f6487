//! Error types for the opening handshake

use std::fmt;

/// Result type alias for handshake operations
pub type Result<T> = std::result::Result<T, Error>;

/// Handshake failure reported by the response validators.
///
/// Every variant is terminal for the connection attempt; the crate has no
/// retry policy of its own. The request builder never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Status line too short to carry a status code, or the code is not numeric
    MalformedStatusLine,
    /// Server answered 407; proxy authentication is not supported
    ProxyAuthRequired,
    /// Server answered 404
    NotFound,
    /// Server answered with a status code other than 101
    UnexpectedStatus(u16),
    /// A required response header is absent or has the wrong value
    MissingOrInvalidHeader(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedStatusLine => write!(f, "Malformed status line in server handshake"),
            Error::ProxyAuthRequired => write!(f, "Proxy authentication not supported"),
            Error::NotFound => write!(f, "Resource not found (404)"),
            Error::UnexpectedStatus(code) => write!(f, "Unexpected status code: {}", code),
            Error::MissingOrInvalidHeader(field) => {
                write!(f, "Missing or invalid header field in server handshake: {}", field)
            }
        }
    }
}

impl std::error::Error for Error {}

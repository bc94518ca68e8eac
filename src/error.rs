/* src/error.rs */

use thiserror::Error;

/// Result type alias for operations that may fail with `RealIpError`.
pub type Result<T> = std::result::Result<T, RealIpError>;

/// Errors that can occur while classifying or extracting addresses.
///
/// The resolvers never surface these; a failing candidate is skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RealIpError {
    /// The string is not an IPv4 or IPv6 literal.
    #[error("Invalid IP address format: {0:?}")]
    InvalidIpFormat(String),

    /// The string could not be split into host and port.
    #[error("Invalid host:port {input:?}: {reason}")]
    InvalidHostPort { input: String, reason: &'static str },

    /// No public IP address found in headers or connection address.
    #[error("No valid IP address found")]
    NoValidIp,
}

/* src/host.rs */

use crate::error::{RealIpError, Result};

/// Split `host:port` or `[host]:port` into host and port.
///
/// The port is returned as-is and is not checked to be numeric. IPv6 hosts
/// must be bracketed; a bare `::1` fails with "too many colons".
pub fn split_host_port(input: &str) -> Result<(&str, &str)> {
    let invalid = |reason| RealIpError::InvalidHostPort {
        input: input.to_string(),
        reason,
    };

    let colon = input.rfind(':').ok_or_else(|| invalid("missing port in address"))?;

    let (host, open_from, close_from) = if input.starts_with('[') {
        let end = input.find(']').ok_or_else(|| invalid("missing ']' in address"))?;
        if end + 1 == input.len() {
            return Err(invalid("missing port in address"));
        }
        if end + 1 != colon {
            return Err(if input.as_bytes()[end + 1] == b':' {
                invalid("too many colons in address")
            } else {
                invalid("missing port in address")
            });
        }
        (&input[1..end], 1, end + 1)
    } else {
        let host = &input[..colon];
        if host.contains(':') {
            return Err(invalid("too many colons in address"));
        }
        (host, 0, 0)
    };

    if input[open_from..].contains('[') {
        return Err(invalid("unexpected '[' in address"));
    }
    if input[close_from..].contains(']') {
        return Err(invalid("unexpected ']' in address"));
    }

    Ok((host, &input[colon + 1..]))
}

/// Extract the host part of a candidate address and trim it.
///
/// Candidates with a colon are treated as `host:port`; when that split fails
/// the result is empty, which no classifier accepts. Candidates without a
/// colon are returned whole.
///
/// # Examples
///
/// ```rust
/// use realip::extract_host;
///
/// assert_eq!(extract_host("127.0.0.1:1234"), "127.0.0.1");
/// assert_eq!(extract_host(" 127.0.0.1 "), "127.0.0.1");
/// assert_eq!(extract_host("[2001:db8::1]:443"), "2001:db8::1");
/// assert_eq!(extract_host("2001:db8::1"), "");
/// ```
pub fn extract_host(candidate: &str) -> &str {
    let host = if candidate.contains(':') {
        match split_host_port(candidate) {
            Ok((host, _port)) => host,
            Err(err) => {
                tracing::trace!(%err, "discarding candidate address");
                ""
            }
        }
    } else {
        candidate
    };

    host.trim()
}

/* src/resolver.rs */

use std::fmt;
use std::net::IpAddr;

use crate::headers::{HeaderLookup, X_CLIENT_IP, X_FORWARDED_FOR, X_REAL_IP};
use crate::host::{extract_host, split_host_port};
use crate::ranges::{PrivateRanges, is_private_address, parse_address};

/// Where a resolved address was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// An entry of the `X-Forwarded-For` chain.
    ForwardedFor,
    /// The `X-Real-Ip` header.
    RealIp,
    /// The `X-Client-Ip` header.
    ClientIp,
    /// The peer address of the connection.
    ConnectionAddress,
}

impl Source {
    /// Stable tag for logs and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::ForwardedFor => "header-forwarded-for",
            Source::RealIp => "header-real-ip",
            Source::ClientIp => "header-client-ip",
            Source::ConnectionAddress => "connection-address",
        }
    }

    /// The header this source reads, `None` for the connection address.
    pub fn header_name(&self) -> Option<&'static str> {
        match self {
            Source::ForwardedFor => Some(X_FORWARDED_FOR),
            Source::RealIp => Some(X_REAL_IP),
            Source::ClientIp => Some(X_CLIENT_IP),
            Source::ConnectionAddress => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A public client address together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAddress {
    address: String,
    ip: IpAddr,
    source: Source,
}

impl ResolvedAddress {
    /// The address as it appeared in the source, without port or whitespace.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The parsed address.
    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn source(&self) -> Source {
        self.source
    }
}

impl fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Resolve the client's public IP address from request headers and the
/// connection address.
///
/// Sources are tried in order and the first public address wins:
///
/// 1. every entry of `X-Forwarded-For`, left to right
/// 2. `X-Real-Ip`
/// 3. `X-Client-Ip`
/// 4. `remote_addr`
///
/// Each candidate has its port stripped and is checked against
/// [`PrivateRanges`]; private, malformed and missing candidates are
/// skipped. Returns `None` when no source yields a public address.
///
/// Forwarding headers are client-controlled and are not authenticated here.
///
/// # Examples
///
/// ```rust
/// use realip::{HeaderMap, Source, resolve_client_ip};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     "X-Forwarded-For".to_string(),
///     "10.0.0.7, 203.0.113.9:5123".to_string(),
/// );
///
/// let resolved = resolve_client_ip(&headers, "127.0.0.1:40000").unwrap();
/// assert_eq!(resolved.address(), "203.0.113.9");
/// assert_eq!(resolved.source(), Source::ForwardedFor);
/// ```
pub fn resolve_client_ip<H>(headers: &H, remote_addr: &str) -> Option<ResolvedAddress>
where
    H: HeaderLookup + ?Sized,
{
    let header = |name| headers.header(name).unwrap_or_default();

    let resolved = header(X_FORWARDED_FOR)
        .split(',')
        .find_map(|candidate| public_candidate(candidate, Source::ForwardedFor))
        .or_else(|| public_candidate(header(X_REAL_IP), Source::RealIp))
        .or_else(|| public_candidate(header(X_CLIENT_IP), Source::ClientIp))
        .or_else(|| public_candidate(remote_addr, Source::ConnectionAddress));

    match &resolved {
        Some(resolved) => {
            tracing::debug!(address = %resolved.address, source = %resolved.source, "resolved client ip")
        }
        None => tracing::debug!(remote_addr, "no public client ip found"),
    }

    resolved
}

fn public_candidate(candidate: &str, source: Source) -> Option<ResolvedAddress> {
    let host = extract_host(candidate);
    match parse_address(host) {
        Ok(ip) if !PrivateRanges::standard().contains(ip) => Some(ResolvedAddress {
            address: host.to_string(),
            ip,
            source,
        }),
        Ok(ip) => {
            tracing::trace!(%ip, %source, "skipping private address");
            None
        }
        Err(err) => {
            tracing::trace!(%err, %source, "skipping candidate");
            None
        }
    }
}

/// Resolve the client address with the older, lenient rules.
///
/// - When neither `X-Real-Ip` nor `X-Forwarded-For` is set, `remote_addr`
///   is returned with its port removed, without any classification.
/// - Otherwise the first public entry of `X-Forwarded-For` is returned.
///   Entries are trimmed but ports are not removed, so `1.2.3.4:80` never
///   matches.
/// - Otherwise the `X-Real-Ip` value is returned unchecked, even when it is
///   private or empty.
///
/// Prefer [`resolve_client_ip`], which validates every source.
///
/// # Examples
///
/// ```rust
/// use realip::{HeaderMap, resolve_client_ip_simple};
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-real-ip".to_string(), "10.1.2.3".to_string());
/// headers.insert("x-forwarded-for".to_string(), "192.168.0.5".to_string());
///
/// assert_eq!(resolve_client_ip_simple(&headers, "203.0.113.1:80"), "10.1.2.3");
/// ```
pub fn resolve_client_ip_simple<H>(headers: &H, remote_addr: &str) -> String
where
    H: HeaderLookup + ?Sized,
{
    let real_ip = headers.header(X_REAL_IP).unwrap_or_default();
    let forwarded_for = headers.header(X_FORWARDED_FOR).unwrap_or_default();

    if real_ip.is_empty() && forwarded_for.is_empty() {
        if !remote_addr.contains(':') {
            return remote_addr.to_string();
        }
        return split_host_port(remote_addr)
            .map(|(host, _port)| host.to_string())
            .unwrap_or_default();
    }

    forwarded_for
        .split(',')
        .map(str::trim)
        .find(|address| is_private_address(address) == Ok(false))
        .unwrap_or(real_ip)
        .to_string()
}

/// Former name of [`resolve_client_ip_simple`].
#[deprecated(note = "use `resolve_client_ip_simple` instead")]
pub fn real_ip<H>(headers: &H, remote_addr: &str) -> String
where
    H: HeaderLookup + ?Sized,
{
    resolve_client_ip_simple(headers, remote_addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headers::HeaderMap;

    const PRIVATE_ADDR: &str = "127.0.0.1:1234";
    const PUBLIC_ADDR: &str = "144.12.54.87";
    const MULTI_ADDRESSES: &str =
        " 127.0.0.1 , 115.98.247.136, 144.12.54.87:1234 , 119.14.55.11:1234 ,";

    fn header_map(real_ip: &str, forwarded_for: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("X-Real-Ip".to_string(), real_ip.to_string());
        headers.insert("X-Forwarded-For".to_string(), forwarded_for.to_string());
        headers
    }

    fn resolve(headers: &HeaderMap, remote_addr: &str) -> Option<(String, &'static str)> {
        resolve_client_ip(headers, remote_addr)
            .map(|resolved| (resolved.address().to_string(), resolved.source().as_str()))
    }

    #[test]
    fn test_private_forwarded_falls_through_to_connection() {
        let headers = header_map("", PRIVATE_ADDR);
        assert_eq!(
            resolve(&headers, PUBLIC_ADDR),
            Some((PUBLIC_ADDR.to_string(), "connection-address"))
        );
    }

    #[test]
    fn test_real_ip_header() {
        let headers = header_map(PUBLIC_ADDR, "");
        assert_eq!(
            resolve(&headers, PRIVATE_ADDR),
            Some((PUBLIC_ADDR.to_string(), "header-real-ip"))
        );
    }

    #[test]
    fn test_forwarded_for_header() {
        let headers = header_map(PRIVATE_ADDR, PUBLIC_ADDR);
        assert_eq!(
            resolve(&headers, PRIVATE_ADDR),
            Some((PUBLIC_ADDR.to_string(), "header-forwarded-for"))
        );
    }

    #[test]
    fn test_first_public_entry_of_chain() {
        let headers = header_map(PRIVATE_ADDR, MULTI_ADDRESSES);
        assert_eq!(
            resolve(&headers, PRIVATE_ADDR),
            Some(("115.98.247.136".to_string(), "header-forwarded-for"))
        );
    }

    #[test]
    fn test_chain_entry_with_port() {
        let headers = header_map("", "10.0.0.1, 119.14.55.11:1234");
        let resolved = resolve_client_ip(&headers, "").unwrap();
        assert_eq!(resolved.address(), "119.14.55.11");
        assert_eq!(resolved.ip(), "119.14.55.11".parse::<IpAddr>().unwrap());
    }

    #[test]
    fn test_all_private() {
        let headers = header_map(PRIVATE_ADDR, PRIVATE_ADDR);
        assert_eq!(resolve(&headers, PRIVATE_ADDR), None);
    }

    #[test]
    fn test_all_malformed() {
        let headers = header_map(":", ":");
        assert_eq!(resolve(&headers, "--"), None);
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(resolve(&HeaderMap::new(), ""), None);
    }

    #[test]
    fn test_client_ip_header_is_last_header() {
        let mut headers = header_map("192.168.1.1", "10.0.0.1");
        headers.insert("X-Client-Ip".to_string(), "198.51.100.7".to_string());
        assert_eq!(
            resolve(&headers, "203.0.113.1:443"),
            Some(("198.51.100.7".to_string(), "header-client-ip"))
        );

        headers.insert("X-Real-Ip".to_string(), "198.51.100.8".to_string());
        assert_eq!(
            resolve(&headers, "203.0.113.1:443"),
            Some(("198.51.100.8".to_string(), "header-real-ip"))
        );
    }

    #[test]
    fn test_bracketed_ipv6_connection_address() {
        let resolved = resolve_client_ip(&HeaderMap::new(), "[2001:db8:85a3::8a2e:370:7334]:8080");
        assert_eq!(
            resolved.map(|r| r.to_string()),
            Some("2001:db8:85a3::8a2e:370:7334".to_string())
        );
        assert_eq!(resolve(&HeaderMap::new(), "[::1]:8080"), None);
    }

    #[test]
    fn test_bare_ipv6_is_unsupported() {
        let headers = header_map("", "2001:db8::1");
        assert_eq!(resolve(&headers, ""), None);
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(Source::ForwardedFor.to_string(), "header-forwarded-for");
        assert_eq!(Source::ConnectionAddress.header_name(), None);
        assert_eq!(Source::ClientIp.header_name(), Some("x-client-ip"));
    }

    #[test]
    fn test_simple_without_headers_uses_connection() {
        let headers = HeaderMap::new();
        assert_eq!(resolve_client_ip_simple(&headers, PUBLIC_ADDR), PUBLIC_ADDR);
        assert_eq!(resolve_client_ip_simple(&headers, "144.12.54.87:5555"), PUBLIC_ADDR);
        // Connection address is not classified in this branch.
        assert_eq!(resolve_client_ip_simple(&headers, "10.0.0.1:80"), "10.0.0.1");
        assert_eq!(resolve_client_ip_simple(&headers, "::1"), "");
    }

    #[test]
    fn test_simple_empty_headers_count_as_absent() {
        let headers = header_map("", "");
        assert_eq!(resolve_client_ip_simple(&headers, PUBLIC_ADDR), PUBLIC_ADDR);
    }

    #[test]
    fn test_simple_forwarded_for() {
        let headers = header_map("", PUBLIC_ADDR);
        assert_eq!(resolve_client_ip_simple(&headers, ""), PUBLIC_ADDR);

        let headers = header_map("", "127.0.0.0, 144.12.54.87");
        assert_eq!(resolve_client_ip_simple(&headers, ""), PUBLIC_ADDR);
    }

    #[test]
    fn test_simple_real_ip() {
        let headers = header_map(PUBLIC_ADDR, "");
        assert_eq!(resolve_client_ip_simple(&headers, ""), PUBLIC_ADDR);
    }

    #[test]
    fn test_simple_falls_back_to_unchecked_real_ip() {
        let headers = header_map("192.168.0.10", "127.0.0.0, 10.0.0.1");
        assert_eq!(resolve_client_ip_simple(&headers, PUBLIC_ADDR), "192.168.0.10");

        // Ports are not stripped from chain entries here.
        let headers = header_map("10.9.8.7", "144.12.54.87:1234");
        assert_eq!(resolve_client_ip_simple(&headers, PUBLIC_ADDR), "10.9.8.7");

        let headers = header_map("", "10.0.0.1");
        assert_eq!(resolve_client_ip_simple(&headers, PUBLIC_ADDR), "");
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_alias() {
        let headers = header_map("", "127.0.0.0, 144.12.54.87");
        assert_eq!(real_ip(&headers, ""), PUBLIC_ADDR);
    }
}

/* src/ranges.rs */

use ipnet::IpNet;
use std::net::IpAddr;
use std::sync::LazyLock;

use crate::error::{RealIpError, Result};

/// Blocks that never identify a client on the public internet.
///
/// - <https://en.wikipedia.org/wiki/Private_network>
/// - <https://en.wikipedia.org/wiki/Link-local_address>
const PRIVATE_CIDRS: [&str; 8] = [
    "127.0.0.0/8",    // loopback
    "10.0.0.0/8",     // 24-bit block
    "172.16.0.0/12",  // 20-bit block
    "192.168.0.0/16", // 16-bit block
    "169.254.0.0/16", // link local
    "::1/128",        // loopback IPv6
    "fc00::/7",       // unique local IPv6
    "fe80::/10",      // link local IPv6
];

static STANDARD: LazyLock<PrivateRanges> = LazyLock::new(|| PrivateRanges {
    networks: PRIVATE_CIDRS
        .iter()
        .map(|cidr| cidr.parse::<IpNet>().expect("static CIDR literal").trunc())
        .collect(),
});

/// Immutable table of private and reserved networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivateRanges {
    networks: Vec<IpNet>,
}

impl PrivateRanges {
    /// The process-wide table, built on first use.
    pub fn standard() -> &'static PrivateRanges {
        &STANDARD
    }

    /// Whether `ip` falls inside any of the networks.
    ///
    /// IPv4-mapped IPv6 addresses are checked as their IPv4 form, so
    /// `::ffff:10.0.0.1` is private just like `10.0.0.1`.
    pub fn contains(&self, ip: IpAddr) -> bool {
        let ip = ip.to_canonical();
        self.networks.iter().any(|network| network.contains(&ip))
    }

    /// Iterate over the networks in the table.
    pub fn iter(&self) -> impl Iterator<Item = &IpNet> {
        self.networks.iter()
    }
}

/// Parse an IPv4 or IPv6 literal. Ports, brackets and hostnames are rejected.
pub fn parse_address(address: &str) -> Result<IpAddr> {
    address
        .parse::<IpAddr>()
        .map_err(|_| RealIpError::InvalidIpFormat(address.to_string()))
}

/// Check whether `address` lies in a private, loopback or link-local range.
///
/// Fails when `address` is not an IP literal. Strip any port with
/// [`extract_host`](crate::host::extract_host) first.
///
/// # Examples
///
/// ```rust
/// use realip::is_private_address;
///
/// assert_eq!(is_private_address("192.168.0.10"), Ok(true));
/// assert_eq!(is_private_address("8.8.8.8"), Ok(false));
/// assert!(is_private_address("8.8.8.8:53").is_err());
/// ```
pub fn is_private_address(address: &str) -> Result<bool> {
    let ip = parse_address(address)?;
    Ok(PrivateRanges::standard().contains(ip))
}

/* src/lib.rs */
//! # Real IP Resolver
//!
//! Resolves the originating public IP address of an HTTP client that may sit
//! behind proxies, load balancers or CDNs.
//!
//! ## Features
//!
//! - Checks `X-Forwarded-For`, `X-Real-Ip`, `X-Client-Ip`, then the
//!   connection address, and returns the first public address
//! - Skips loopback, RFC 1918, link-local and unique-local addresses
//! - Reports which source supplied the address
//! - A lenient legacy resolver for callers that depend on its fallbacks
//! - Optional Axum middleware and extractor integration via the `axum` feature
//!
//! Forwarding headers are set by whoever sends the request. Nothing here
//! authenticates them.
//!
//! ## Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use realip::{HeaderMap, Source, resolve_client_ip};
//!
//! let mut headers = HeaderMap::new();
//! headers.insert(
//!     "X-Forwarded-For".to_string(),
//!     " 127.0.0.1 , 115.98.247.136, 144.12.54.87:1234".to_string(),
//! );
//!
//! let resolved = resolve_client_ip(&headers, "10.0.0.1:52000").unwrap();
//! assert_eq!(resolved.address(), "115.98.247.136");
//! assert_eq!(resolved.source(), Source::ForwardedFor);
//! ```

pub mod error;
pub mod headers;
pub mod host;
pub mod ranges;
pub mod resolver;

#[cfg(feature = "axum")]
pub mod middleware;

pub use error::{RealIpError, Result};
pub use headers::{HeaderLookup, HeaderMap, X_CLIENT_IP, X_FORWARDED_FOR, X_REAL_IP};
pub use host::{extract_host, split_host_port};
pub use ranges::{PrivateRanges, is_private_address, parse_address};
#[allow(deprecated)]
pub use resolver::real_ip;
pub use resolver::{ResolvedAddress, Source, resolve_client_ip, resolve_client_ip_simple};

#[cfg(feature = "axum")]
pub use middleware::{RealIp, RealIpLayer, RealIpService};

/// Re-export commonly used types
pub use std::net::IpAddr;

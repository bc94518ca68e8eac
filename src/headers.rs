/* src/headers.rs */

use std::collections::HashMap;

/// Comma-separated chain of client and proxy addresses.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
/// Single client address set by a reverse proxy.
pub const X_REAL_IP: &str = "x-real-ip";
/// Single client address set by some load balancers.
pub const X_CLIENT_IP: &str = "x-client-ip";

/// Type alias for header maps. Keys may use any case.
pub type HeaderMap = HashMap<String, String>;

/// Case-insensitive, read-only access to request headers.
///
/// When a header carries several values only the first one is returned.
pub trait HeaderLookup {
    /// Return the first value of the header `name`, if present.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HashMap<String, String> {
    fn header(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.get(name) {
            return Some(value.as_str());
        }
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl HeaderLookup for HashMap<String, Vec<String>> {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .or_else(|| {
                self.iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, values)| values)
            })
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

#[cfg(feature = "axum")]
impl HeaderLookup for axum::http::HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        // Values that are not visible ASCII are treated as absent.
        self.get(name).and_then(|value| value.to_str().ok())
    }
}

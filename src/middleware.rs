/* src/middleware.rs */

use axum::{
    extract::{ConnectInfo, FromRequestParts, OptionalFromRequestParts, Request},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;
use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
    task::{Context, Poll},
};
use tower::{Layer, Service};

use crate::error::RealIpError;
use crate::resolver::{ResolvedAddress, Source, resolve_client_ip, resolve_client_ip_simple};

/// Extension that holds the resolved client address.
///
/// Also an axum extractor: when [`RealIpLayer`] is not installed the address
/// is resolved on the spot. Rejects with `400 Bad Request` when no address can
/// be resolved; extract `Option<RealIp>` to handle that in the handler.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Json, Router, routing::get};
/// use realip::{RealIp, RealIpLayer};
/// use serde_json::json;
///
/// async fn handler(real_ip: Option<RealIp>) -> Json<serde_json::Value> {
///     match real_ip {
///         Some(ip) => Json(json!({"ip": ip.address()})),
///         None => Json(json!({"error": "Could not determine real IP"})),
///     }
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(RealIpLayer::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealIp {
    address: String,
    source: Option<Source>,
}

impl RealIp {
    /// The resolved address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Where the address came from. `None` when the simple resolver was used.
    pub fn source(&self) -> Option<Source> {
        self.source
    }

    /// The address parsed as an IP.
    ///
    /// The simple resolver can return values that are not IP literals, in
    /// which case this is `None`.
    pub fn ip(&self) -> Option<IpAddr> {
        self.address.parse().ok()
    }
}

impl From<ResolvedAddress> for RealIp {
    fn from(resolved: ResolvedAddress) -> Self {
        Self {
            address: resolved.address().to_string(),
            source: Some(resolved.source()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Validated,
    Simple,
}

/// Layer that resolves the client address of each request.
///
/// The result is stored as a [`RealIp`] request extension. Nothing is stored
/// when no address could be resolved.
///
/// # Examples
///
/// ```rust,no_run
/// use axum::{Router, routing::get};
/// use realip::{RealIp, RealIpLayer};
///
/// async fn handler(real_ip: RealIp) -> String {
///     real_ip.address().to_string()
/// }
///
/// let app: Router = Router::new()
///     .route("/", get(handler))
///     .layer(RealIpLayer::default());
/// ```
#[derive(Debug, Clone)]
pub struct RealIpLayer {
    mode: Mode,
}

impl Default for RealIpLayer {
    fn default() -> Self {
        Self {
            mode: Mode::Validated,
        }
    }
}

impl RealIpLayer {
    /// Create a layer that uses [`resolve_client_ip`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layer that uses [`resolve_client_ip_simple`].
    pub fn simple() -> Self {
        Self { mode: Mode::Simple }
    }
}

impl<S> Layer<S> for RealIpLayer {
    type Service = RealIpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RealIpService {
            inner,
            mode: self.mode,
        }
    }
}

/// Service that resolves client addresses.
#[derive(Debug, Clone)]
pub struct RealIpService<S> {
    inner: S,
    mode: Mode,
}

impl<S> Service<Request> for RealIpService<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let remote_addr = connection_address(req.extensions().get::<ConnectInfo<SocketAddr>>());

        let real_ip = match self.mode {
            Mode::Validated => resolve_client_ip(req.headers(), &remote_addr).map(RealIp::from),
            Mode::Simple => {
                let address = resolve_client_ip_simple(req.headers(), &remote_addr);
                (!address.is_empty()).then_some(RealIp {
                    address,
                    source: None,
                })
            }
        };

        if let Some(real_ip) = real_ip {
            req.extensions_mut().insert(real_ip);
        }

        Box::pin(self.inner.call(req))
    }
}

/// Peer address as `ip:port`, bracketed for IPv6. Empty without connect info.
fn connection_address(connect_info: Option<&ConnectInfo<SocketAddr>>) -> String {
    connect_info
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default()
}

/// Use the layer's extension, or resolve on the spot when the layer is absent.
fn real_ip_from_parts(parts: &Parts) -> Option<RealIp> {
    if let Some(real_ip) = parts.extensions.get::<RealIp>() {
        return Some(real_ip.clone());
    }

    let remote_addr = connection_address(parts.extensions.get::<ConnectInfo<SocketAddr>>());
    resolve_client_ip(&parts.headers, &remote_addr).map(RealIp::from)
}

impl IntoResponse for RealIpError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

impl<S> FromRequestParts<S> for RealIp
where
    S: Send + Sync,
{
    type Rejection = RealIpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        real_ip_from_parts(parts).ok_or(RealIpError::NoValidIp)
    }
}

impl<S> OptionalFromRequestParts<S> for RealIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(real_ip_from_parts(parts))
    }
}

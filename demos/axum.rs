/* demos/axum.rs */

use axum::{
    Router,
    extract::ConnectInfo,
    response::{Html, Json},
    routing::get,
};
use realip::{RealIp, RealIpLayer, X_CLIENT_IP, X_FORWARDED_FOR, X_REAL_IP};
use serde_json::json;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_app();
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    println!("Server starting on http://localhost:3000");
    println!("Test endpoints:");
    println!("  • GET /              - Hello World with the resolved IP");
    println!("  • GET /ip            - JSON response with IP details");
    println!("  • GET /simple        - JSON response from the legacy resolver");
    println!("  • GET /debug         - Connection and forwarding header info");
    println!();
    println!("Test with headers:");
    println!("  curl -H 'X-Real-Ip: 203.0.113.42' http://localhost:3000/ip");
    println!("  curl -H 'X-Forwarded-For: 192.168.1.1, 198.51.100.1' http://localhost:3000/ip");
    println!("  curl -H 'X-Real-Ip: 10.0.0.1' -H 'X-Forwarded-For: 127.0.0.1' http://localhost:3000/simple");
    println!();

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}

fn create_app() -> Router {
    let default_router = Router::new()
        .route("/", get(hello_handler))
        .route("/ip", get(ip_handler))
        .layer(RealIpLayer::new());

    let simple_router = Router::new()
        .route("/", get(ip_handler))
        .layer(RealIpLayer::simple());

    default_router
        .nest("/simple", simple_router)
        .route("/debug", get(debug_handler))
}

async fn hello_handler(real_ip: Option<RealIp>) -> Html<String> {
    let ip = real_ip
        .map(|ip| ip.address().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    Html(format!(
        "<!DOCTYPE html><html><body><h1>Hello, World!</h1><p>Your IP address is: <b>{}</b></p></body></html>",
        ip
    ))
}

async fn ip_handler(real_ip: Option<RealIp>) -> Json<serde_json::Value> {
    let Some(real_ip) = real_ip else {
        return Json(json!({"error": "Could not determine a public client IP"}));
    };

    Json(json!({
        "real_ip": real_ip.address(),
        "source": real_ip.source().map(|source| source.as_str()),
        "ip_version": match real_ip.ip() {
            Some(std::net::IpAddr::V4(_)) => "IPv4",
            Some(std::net::IpAddr::V6(_)) => "IPv6",
            None => "unknown",
        },
    }))
}

async fn debug_handler(
    real_ip: Option<RealIp>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: axum::http::HeaderMap,
) -> Json<serde_json::Value> {
    let forwarding_headers: serde_json::Map<String, serde_json::Value> =
        [X_FORWARDED_FOR, X_REAL_IP, X_CLIENT_IP]
            .into_iter()
            .filter_map(|name| {
                let value = headers.get(name)?.to_str().ok()?;
                Some((name.to_string(), json!(value)))
            })
            .collect();

    Json(json!({
        "resolved": real_ip.as_ref().map(|ip| ip.address()),
        "source": real_ip.as_ref().and_then(|ip| ip.source()).map(|source| source.as_str()),
        "connection_info": {
            "remote_addr": addr.to_string(),
            "remote_ip": addr.ip().to_string(),
            "remote_port": addr.port(),
        },
        "forwarding_headers": forwarding_headers,
    }))
}

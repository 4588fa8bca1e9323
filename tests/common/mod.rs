//! Shared utilities for the integration tests.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::Request;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

use rizgate::config::{GatewayConfig, UpstreamConfig};
use rizgate::GatewayServer;

/// Start an upstream that echoes method, path, query and body as JSON and
/// counts the requests it saw.
pub async fn start_echo_upstream(addr: SocketAddr) -> Arc<AtomicU32> {
    let hits = Arc::new(AtomicU32::new(0));
    let seen = hits.clone();

    let app = Router::new().fallback(move |request: Request| {
        let seen = seen.clone();
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            echo(request).await
        }
    });

    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    hits
}

async fn echo(request: Request) -> Response {
    let (parts, body) = request.into_parts();
    if parts.uri.path() == "/boom" {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded",
        )
            .into_response();
    }

    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let payload = serde_json::json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "body": String::from_utf8_lossy(&bytes),
    });

    Response::builder()
        .header("content-type", "application/json")
        .header("x-upstream", "echo")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Write a throwaway UI bundle and return its root.
pub fn temp_site() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rizgate-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("index.html"), "<html>riz ui</html>").unwrap();
    std::fs::write(dir.join("assets").join("app.js"), "console.log('ui')").unwrap();
    dir
}

/// Gateway config pointing at the given upstream, with a throwaway UI.
pub fn gateway_config(wa_upstream: Option<String>, static_root: PathBuf) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.auth.secret_key = "integration-secret".to_string();
    config.routing.upstreams = vec![
        UpstreamConfig {
            name: "whatsapp".to_string(),
            segment: "wa".to_string(),
            base_url: wa_upstream,
        },
        UpstreamConfig {
            name: "mail".to_string(),
            segment: "mail".to_string(),
            base_url: None,
        },
    ];
    config.static_assets.root = static_root;
    config.timeouts.upstream_secs = 2;
    config
}

/// Spawn the gateway on `addr` and wait until it accepts connections.
pub async fn start_gateway(addr: SocketAddr, config: GatewayConfig) {
    let listener = TcpListener::bind(addr).await.unwrap();
    let server = GatewayServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}

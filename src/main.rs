//! RizGate binary: load environment configuration, verify the bundled UI,
//! bind the listener and run the gateway.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rizgate::config;
use rizgate::http::GatewayServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before the subscriber so RUST_LOG from the file applies.
    let dotenv_missing = dotenvy::dotenv().is_err();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rizgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("rizgate v0.1.0 starting");
    if dotenv_missing {
        tracing::warn!("no .env file found, using process environment only");
    }

    let config = config::from_env()?;

    if config.auth.secret_key.is_empty() {
        tracing::warn!("RIZ_SECRET_KEY is empty; every API request will be rejected");
    }
    for upstream in &config.routing.upstreams {
        match &upstream.base_url {
            Some(url) => {
                tracing::info!(upstream = %upstream.name, target = %url, "upstream configured")
            }
            None => tracing::warn!(
                upstream = %upstream.name,
                "upstream base URL not set; matching requests will fail"
            ),
        }
    }

    // A gateway without its UI bundle serves degraded traffic; refuse to
    // start instead.
    let index = config
        .static_assets
        .root
        .join(&config.static_assets.index);
    let index_bytes = std::fs::metadata(&index)
        .map_err(|e| format!("bundled UI index {} is missing: {e}", index.display()))?
        .len();
    tracing::info!(
        index = %index.display(),
        bytes = index_bytes,
        "static asset tree verified"
    );

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.security.max_body_bytes,
        rate_limit = config.rate_limit.max_requests,
        "configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = GatewayServer::new(config);
    server.run(listener).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

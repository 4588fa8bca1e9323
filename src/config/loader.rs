//! Configuration loading from the process environment.

use thiserror::Error;
use url::Url;

use crate::config::schema::{AuthConfig, GatewayConfig, ListenerConfig, UpstreamConfig};

const DEFAULT_PORT: u16 = 4000;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid {name} value {value:?}: {source}")]
    InvalidUpstreamUrl {
        name: &'static str,
        value: String,
        source: url::ParseError,
    },
}

/// Build a [`GatewayConfig`] from environment variables.
///
/// Reads `PORT` (default 4000), `RIZ_SECRET_KEY`, `WA_SERVICE_URL`,
/// `MAIL_SERVICE_URL` and optionally `STATIC_DIR`. Upstream URLs are
/// validated here so a typo fails at startup; *unset* upstreams are allowed
/// and fail per-request instead.
pub fn from_env() -> Result<GatewayConfig, ConfigError> {
    let port = match non_empty_var("PORT") {
        Some(value) => value
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort { value, source })?,
        None => DEFAULT_PORT,
    };

    let upstreams = vec![
        UpstreamConfig {
            name: "whatsapp".to_string(),
            segment: "wa".to_string(),
            base_url: upstream_url("WA_SERVICE_URL")?,
        },
        UpstreamConfig {
            name: "mail".to_string(),
            segment: "mail".to_string(),
            base_url: upstream_url("MAIL_SERVICE_URL")?,
        },
    ];

    let mut config = GatewayConfig {
        listener: ListenerConfig {
            bind_address: format!("0.0.0.0:{port}"),
        },
        auth: AuthConfig {
            secret_key: non_empty_var("RIZ_SECRET_KEY").unwrap_or_default(),
        },
        ..GatewayConfig::default()
    };
    config.routing.upstreams = upstreams;

    if let Some(dir) = non_empty_var("STATIC_DIR") {
        config.static_assets.root = dir.into();
    }

    Ok(config)
}

/// Read an environment variable, treating unset and blank as absent.
fn non_empty_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

fn upstream_url(name: &'static str) -> Result<Option<String>, ConfigError> {
    match non_empty_var(name) {
        Some(value) => {
            Url::parse(&value).map_err(|source| ConfigError::InvalidUpstreamUrl {
                name,
                value: value.clone(),
                source,
            })?;
            Ok(Some(value.trim_end_matches('/').to_string()))
        }
        None => Ok(None),
    }
}

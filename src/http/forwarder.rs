//! Upstream request forwarding.
//!
//! # Responsibilities
//! - Rebuild the admitted request against the resolved target URL
//! - Strip hop-by-hop headers in both directions
//! - Enforce the body ceiling and a bounded upstream timeout
//! - Relay the upstream response verbatim; no automatic retries

use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName};
use axum::http::{header, Request, Uri};
use axum::response::Response;
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use crate::error::GatewayError;

/// Forwards an admitted, authenticated request to an upstream.
///
/// A trait so the pipeline can be exercised with an injected fake instead of
/// a live backend.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(
        &self,
        target: &str,
        request: Request<Body>,
    ) -> Result<Response, GatewayError>;
}

/// Production forwarder backed by a pooled hyper client.
pub struct HttpForwarder {
    client: Client<HttpConnector, Body>,
    timeout: Duration,
    max_body_bytes: usize,
}

impl HttpForwarder {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            timeout,
            max_body_bytes,
        }
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(
        &self,
        target: &str,
        request: Request<Body>,
    ) -> Result<Response, GatewayError> {
        let uri: Uri = target
            .parse()
            .map_err(|_| GatewayError::ConfigurationInvalid(target.to_string()))?;

        let (parts, body) = request.into_parts();

        // The relay obeys the same body ceiling as direct requests; streaming
        // an unbounded body through would defeat the inbound limit.
        let body_bytes = axum::body::to_bytes(body, self.max_body_bytes)
            .await
            .map_err(|_| GatewayError::PayloadTooLarge)?;

        let mut builder = Request::builder().method(parts.method).uri(uri);
        if let Some(headers) = builder.headers_mut() {
            for (name, value) in parts.headers.iter() {
                // Host is derived from the target authority by the client.
                if is_hop_by_hop(name) || name == header::HOST {
                    continue;
                }
                headers.append(name.clone(), value.clone());
            }
        }
        let outbound = builder
            .body(Body::from(body_bytes))
            .map_err(|e| GatewayError::UpstreamUnavailable(format!("{target}: {e}")))?;

        // Bounded wait; dropping this future (client disconnect) cancels the
        // in-flight upstream call.
        let response = match tokio::time::timeout(self.timeout, self.client.request(outbound)).await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(GatewayError::UpstreamUnavailable(format!("{target}: {e}")))
            }
            Err(_) => {
                return Err(GatewayError::UpstreamUnavailable(format!(
                    "{target}: timed out after {:?}",
                    self.timeout
                )))
            }
        };

        if response.status().is_server_error() {
            tracing::warn!(
                target,
                error = %GatewayError::UpstreamError(response.status()),
                "relaying upstream error status"
            );
        }

        let (mut parts, body) = response.into_parts();
        strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let hop: Vec<HeaderName> = headers
        .keys()
        .filter(|name| is_hop_by_hop(name))
        .cloned()
        .collect();
    for name in hop {
        headers.remove(name);
    }
}

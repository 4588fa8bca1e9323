//! The per-request gateway pipeline.
//!
//! Linear state machine: Received → SecurityHeaders → CORSCheck → RateCheck
//! → RouteDispatch → {Authenticate → Proxy} | StaticServe → Responded.
//! Hardening and CORS response headers are attached by the driver on every
//! exit path, so the SecurityHeaders stage can never reject.

use std::net::SocketAddr;

use axum::body::Body;
use axum::http::header::{self, HeaderValue};
use axum::http::{Method, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::GatewayError;
use crate::gateway::GatewayContext;
use crate::routing::RouteDecision;
use crate::security::API_KEY_HEADER;

/// Liveness endpoint; answered after the rate check, before routing/auth.
const LIVENESS_PATH: &str = "/status";

/// Outcome of a single pipeline stage.
pub enum StageOutcome {
    /// Hand the request to the next stage.
    Continue(Request<Body>),
    /// Short-circuit with this response; later stages never run.
    Respond(Response),
}

/// Drive one request through the pipeline. Always reaches `Responded`.
pub async fn handle(
    ctx: &GatewayContext,
    client: SocketAddr,
    request: Request<Body>,
) -> Response {
    let request = match cors_check(request) {
        StageOutcome::Continue(request) => request,
        StageOutcome::Respond(response) => return finalize(response),
    };
    let request = match body_limit_check(ctx, client, request) {
        StageOutcome::Continue(request) => request,
        StageOutcome::Respond(response) => return finalize(response),
    };
    let request = match rate_check(ctx, client, request) {
        StageOutcome::Continue(request) => request,
        StageOutcome::Respond(response) => return finalize(response),
    };

    let response = match dispatch(ctx, request).await {
        Ok(response) => response,
        Err(error) => reject(error, client),
    };
    finalize(response)
}

/// CORS stage. Preflight requests are answered immediately; everything else
/// continues, and `finalize` adds the allow-origin header to the response.
fn cors_check(request: Request<Body>) -> StageOutcome {
    if request.method() != Method::OPTIONS || !request.headers().contains_key(header::ORIGIN) {
        return StageOutcome::Continue(request);
    }

    let mut response = StatusCode::NO_CONTENT.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, HEAD, PUT, DELETE, PATCH"),
    );
    if let Some(requested) = request.headers().get(header::ACCESS_CONTROL_REQUEST_HEADERS) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, requested.clone());
    }
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("300"),
    );
    StageOutcome::Respond(response)
}

/// Reject declared-oversized bodies before any further work. Bodies without
/// a Content-Length are bounded again when the forwarder buffers them.
fn body_limit_check(
    ctx: &GatewayContext,
    client: SocketAddr,
    request: Request<Body>,
) -> StageOutcome {
    let declared = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<usize>().ok());

    match declared {
        Some(length) if length > ctx.max_body_bytes => {
            StageOutcome::Respond(reject(GatewayError::PayloadTooLarge, client))
        }
        _ => StageOutcome::Continue(request),
    }
}

/// Rate limiting stage, keyed by the caller's network address.
fn rate_check(ctx: &GatewayContext, client: SocketAddr, request: Request<Body>) -> StageOutcome {
    if ctx.limiter.admit(&client.ip().to_string()) {
        StageOutcome::Continue(request)
    } else {
        StageOutcome::Respond(reject(GatewayError::RateLimitExceeded, client))
    }
}

/// Route dispatch: liveness, upstream proxy (behind auth), or static serve.
async fn dispatch(
    ctx: &GatewayContext,
    request: Request<Body>,
) -> Result<Response, GatewayError> {
    if request.uri().path() == LIVENESS_PATH {
        return Ok(liveness_response());
    }

    match ctx.routes.resolve(request.uri().path()) {
        RouteDecision::StaticAsset => Ok(ctx.assets.serve(request).await),
        RouteDecision::Upstream { route, remainder } => {
            authenticate(ctx, &request)?;

            let base = route
                .base_url
                .as_deref()
                .ok_or_else(|| GatewayError::ConfigurationInvalid(route.name.clone()))?;
            let target = build_target(base, &remainder, request.uri().query());

            tracing::info!(route = %route.name, target = %target, "forwarding to upstream");
            ctx.forwarder.forward(&target, request).await
        }
        RouteDecision::NotFound => {
            // Unknown namespaces under the API prefix still require the key,
            // so the route layout is not probeable without it.
            authenticate(ctx, &request)?;
            Err(GatewayError::RouteNotFound)
        }
    }
}

/// Authentication stage, API paths only.
fn authenticate(ctx: &GatewayContext, request: &Request<Body>) -> Result<(), GatewayError> {
    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if ctx.authenticator.authorize(provided) {
        Ok(())
    } else {
        Err(GatewayError::Unauthorized)
    }
}

fn build_target(base: &str, remainder: &str, query: Option<&str>) -> String {
    let mut target = format!("{}/{}", base.trim_end_matches('/'), remainder);
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }
    target
}

fn liveness_response() -> Response {
    Json(json!({ "status": "Guarding", "uptime": "Active" })).into_response()
}

/// Convert an error into its response, emitting the single audit log line.
fn reject(error: GatewayError, client: SocketAddr) -> Response {
    match &error {
        GatewayError::Unauthorized | GatewayError::RateLimitExceeded => {
            tracing::warn!(client = %client.ip(), error = %error, "request rejected");
        }
        GatewayError::UpstreamUnavailable(_)
        | GatewayError::UpstreamError(_)
        | GatewayError::ConfigurationInvalid(_) => {
            tracing::error!(error = %error, "upstream failure");
        }
        _ => {
            tracing::warn!(error = %error, "request rejected");
        }
    }
    error.into_response()
}

/// Terminal stage: hardening and CORS headers on every response.
fn finalize(mut response: Response) -> Response {
    crate::security::headers::apply(response.headers_mut());
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(header::SERVER, HeaderValue::from_static("rizgate"));
    response
}

//! Hardening response headers.
//!
//! Attached unconditionally to every response leaving the gateway; this
//! stage never rejects a request.

use axum::http::header::{HeaderMap, HeaderName, HeaderValue};

const HARDENING: [(&str, &str); 7] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "0"),
    ("referrer-policy", "no-referrer"),
    ("x-download-options", "noopen"),
    ("x-dns-prefetch-control", "off"),
    ("x-permitted-cross-domain-policies", "none"),
];

/// Apply the hardening header set, overriding anything an upstream set.
pub fn apply(headers: &mut HeaderMap) {
    for (name, value) in HARDENING {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

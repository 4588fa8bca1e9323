//! Shared-secret authentication for API paths.

use subtle::ConstantTimeEq;

/// Header carrying the caller's credential.
pub const API_KEY_HEADER: &str = "x-riz-key";

/// Validates the shared-secret credential presented by callers.
///
/// Stateless; the secret is loaded once at startup. There are no per-user
/// identities, only one process-wide key.
pub struct Authenticator {
    secret: String,
}

impl Authenticator {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Exact-match check of the provided credential against the configured
    /// secret. False whenever either side is empty, so an unconfigured
    /// secret never admits anyone.
    pub fn authorize(&self, provided: &str) -> bool {
        if self.secret.is_empty() || provided.is_empty() {
            return false;
        }
        self.secret.as_bytes().ct_eq(provided.as_bytes()).into()
    }
}

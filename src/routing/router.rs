//! Path-based route resolution.

use crate::config::RoutingConfig;

/// A compiled upstream namespace beneath the API prefix.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Name used in logs and error messages.
    pub name: String,

    /// Path segment directly after the API prefix.
    pub segment: String,

    /// Upstream base URL; `None` means unconfigured and fails per-request.
    pub base_url: Option<String>,
}

/// Outcome of resolving an incoming path.
#[derive(Debug)]
pub enum RouteDecision<'a> {
    /// Path belongs to an upstream namespace. `remainder` is the path after
    /// the namespace segment, without a leading slash.
    Upstream {
        route: &'a RouteEntry,
        remainder: String,
    },

    /// Path lies outside the API prefix; handled by the static asset server.
    StaticAsset,

    /// Path is under the API prefix but matches no namespace.
    NotFound,
}

/// Static mapping from path prefixes to upstream targets.
///
/// Built once from configuration and read-only for the lifetime of the
/// process.
#[derive(Debug)]
pub struct RouteTable {
    api_prefix: String,
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn from_config(config: &RoutingConfig) -> Self {
        let mut entries: Vec<RouteEntry> = config
            .upstreams
            .iter()
            .map(|upstream| RouteEntry {
                name: upstream.name.clone(),
                segment: upstream.segment.trim_matches('/').to_string(),
                base_url: upstream
                    .base_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(|url| url.trim_end_matches('/').to_string()),
            })
            .collect();

        // Longest segment first, so overlapping namespaces resolve to the
        // most specific entry.
        entries.sort_by(|a, b| b.segment.len().cmp(&a.segment.len()));

        Self {
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
            entries,
        }
    }

    /// Resolve a request path to a routing decision.
    pub fn resolve(&self, path: &str) -> RouteDecision<'_> {
        let Some(rest) = self.api_remainder(path) else {
            return RouteDecision::StaticAsset;
        };

        for entry in &self.entries {
            if let Some(remainder) = segment_remainder(rest, &entry.segment) {
                return RouteDecision::Upstream {
                    route: entry,
                    remainder,
                };
            }
        }
        RouteDecision::NotFound
    }

    /// Path after the API prefix, or `None` when the path is outside it.
    fn api_remainder<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(&self.api_prefix)?;
        if rest.is_empty() {
            Some("")
        } else {
            rest.strip_prefix('/')
        }
    }
}

/// Path after `segment`, or `None` when `rest` is not under it.
fn segment_remainder(rest: &str, segment: &str) -> Option<String> {
    let tail = rest.strip_prefix(segment)?;
    if tail.is_empty() {
        Some(String::new())
    } else {
        tail.strip_prefix('/').map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    fn table() -> RouteTable {
        RouteTable::from_config(&RoutingConfig {
            api_prefix: "/v1".to_string(),
            upstreams: vec![
                UpstreamConfig {
                    name: "whatsapp".to_string(),
                    segment: "wa".to_string(),
                    base_url: Some("http://wa.local:3001".to_string()),
                },
                UpstreamConfig {
                    name: "mail".to_string(),
                    segment: "mail".to_string(),
                    base_url: None,
                },
            ],
        })
    }

    #[test]
    fn api_namespaces_resolve_to_upstreams_with_remainders() {
        let table = table();

        match table.resolve("/v1/wa/foo/bar") {
            RouteDecision::Upstream { route, remainder } => {
                assert_eq!(route.name, "whatsapp");
                assert_eq!(remainder, "foo/bar");
            }
            other => panic!("unexpected decision: {other:?}"),
        }

        match table.resolve("/v1/mail") {
            RouteDecision::Upstream { route, remainder } => {
                assert_eq!(route.name, "mail");
                assert_eq!(remainder, "");
                assert_eq!(route.base_url, None);
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }

    #[test]
    fn segment_match_requires_a_full_segment() {
        let table = table();
        // "wallet" shares the "wa" prefix but is a different namespace.
        assert!(matches!(
            table.resolve("/v1/wallet/balance"),
            RouteDecision::NotFound
        ));
    }

    #[test]
    fn unknown_api_paths_are_not_found() {
        let table = table();
        assert!(matches!(table.resolve("/v1/nope"), RouteDecision::NotFound));
        assert!(matches!(table.resolve("/v1"), RouteDecision::NotFound));
        assert!(matches!(table.resolve("/v1/"), RouteDecision::NotFound));
    }

    #[test]
    fn non_api_paths_fall_through_to_static_assets() {
        let table = table();
        assert!(matches!(table.resolve("/"), RouteDecision::StaticAsset));
        assert!(matches!(
            table.resolve("/dashboard/settings"),
            RouteDecision::StaticAsset
        ));
        // Prefix match is segment-exact: "/v1beta" is not the API prefix.
        assert!(matches!(
            table.resolve("/v1beta/wa/x"),
            RouteDecision::StaticAsset
        ));
    }

    #[test]
    fn overlapping_segments_prefer_the_most_specific() {
        let table = RouteTable::from_config(&RoutingConfig {
            api_prefix: "/v1".to_string(),
            upstreams: vec![
                UpstreamConfig {
                    name: "short".to_string(),
                    segment: "wa".to_string(),
                    base_url: None,
                },
                UpstreamConfig {
                    name: "long".to_string(),
                    segment: "wa/archive".to_string(),
                    base_url: None,
                },
            ],
        });

        match table.resolve("/v1/wa/archive/2024") {
            RouteDecision::Upstream { route, remainder } => {
                assert_eq!(route.name, "long");
                assert_eq!(remainder, "2024");
            }
            other => panic!("unexpected decision: {other:?}"),
        }
    }
}

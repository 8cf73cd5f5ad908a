//! Service configuration.
//!
//! All policy values live here as named constants; logic elsewhere
//! never hardcodes them.

use std::time::Duration;

/// Default listening port, overridable via `PORT`.
pub const DEFAULT_PORT: u16 = 8080;

/// Snapshot time-to-live. Requests inside this window are served from
/// cache without touching the upstream feed.
pub const CACHE_TTL: Duration = Duration::from_millis(120_000);

/// Default CORS origin allow-list (comma-separated). Wildcard origins
/// are not accepted.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Runtime configuration assembled from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    /// MRMS directory URL.
    pub base_url: String,
    pub cache_ttl: Duration,
    /// Grid subsampling stride.
    pub stride: usize,
    pub allowed_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            base_url: mrms_source::DEFAULT_BASE_URL.to_string(),
            cache_ttl: CACHE_TTL,
            stride: radar_sampling::DEFAULT_STRIDE,
            allowed_origins: parse_origins(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}

/// Split a comma-separated origin list, dropping empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://a.example, http://b.example ,,");
        assert_eq!(origins, vec!["http://a.example", "http://b.example"]);
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_ttl, Duration::from_millis(120_000));
        assert_eq!(config.stride, 25);
        assert_eq!(config.allowed_origins.len(), 2);
    }
}

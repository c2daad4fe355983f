//! Client configuration and runtime patches.

use crate::{Error, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://doha-kr-ap.vercel.app/api/manseryeok";
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Remote API endpoint, POSTed to by the remote tier.
    pub remote_endpoint: String,
    /// When false, tier 1 is skipped entirely (no lookup, no store-back).
    /// Tiers 2 and 3 are unaffected.
    pub cache_enabled: bool,
    /// Maximum age of a cache entry. Captured per entry at insert time.
    pub cache_ttl: Duration,
    /// Hard deadline for one remote call. Expiry cancels the request.
    pub timeout: Duration,
    /// Cache size bound; overflow evicts the oldest-inserted entry.
    pub max_entries: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            remote_endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_enabled: true,
            cache_ttl: DEFAULT_TTL,
            timeout: DEFAULT_TIMEOUT,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote_endpoint = endpoint.into();
        self
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::configuration("timeout must be greater than zero"));
        }
        if self.cache_ttl.is_zero() {
            return Err(Error::configuration("cache TTL must be greater than zero"));
        }
        if self.max_entries == 0 {
            return Err(Error::configuration("max_entries must be at least 1"));
        }
        Url::parse(&self.remote_endpoint)
            .map_err(|e| Error::configuration(format!("invalid remote endpoint: {e}")))?;
        Ok(())
    }
}

/// A partial configuration update, merged by
/// [`crate::ManseryeokClient::update_config`]. Unset fields keep their
/// current value. Validation happens against the merged result before
/// anything is applied.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub remote_endpoint: Option<String>,
    pub cache_enabled: Option<bool>,
    pub cache_ttl: Option<Duration>,
    pub timeout: Option<Duration>,
    pub max_entries: Option<usize>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.remote_endpoint = Some(endpoint.into());
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    pub(crate) fn merged_into(&self, base: &ClientConfig) -> ClientConfig {
        ClientConfig {
            remote_endpoint: self
                .remote_endpoint
                .clone()
                .unwrap_or_else(|| base.remote_endpoint.clone()),
            cache_enabled: self.cache_enabled.unwrap_or(base.cache_enabled),
            cache_ttl: self.cache_ttl.unwrap_or(base.cache_ttl),
            timeout: self.timeout.unwrap_or(base.timeout),
            max_entries: self.max_entries.unwrap_or(base.max_entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_values() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.timeout, Duration::from_millis(5000));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(86_400));
        assert_eq!(cfg.max_entries, 1000);
        assert!(cfg.cache_enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = ClientConfig::new()
            .with_endpoint("http://localhost:4010/api/manseryeok")
            .with_ttl(Duration::from_secs(60))
            .with_timeout(Duration::from_millis(250))
            .with_max_entries(10)
            .with_cache_enabled(false);
        assert_eq!(cfg.max_entries, 10);
        assert!(!cfg.cache_enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let cfg = ClientConfig::new().with_timeout(Duration::ZERO);
        assert!(matches!(
            cfg.validate(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn bad_endpoint_is_rejected() {
        let cfg = ClientConfig::new().with_endpoint("not a url");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn patch_merges_only_set_fields() {
        let base = ClientConfig::default();
        let merged = ConfigPatch::new()
            .timeout(Duration::from_millis(100))
            .merged_into(&base);
        assert_eq!(merged.timeout, Duration::from_millis(100));
        assert_eq!(merged.cache_ttl, base.cache_ttl);
        assert_eq!(merged.remote_endpoint, base.remote_endpoint);
    }
}

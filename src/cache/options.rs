//! Per-write options for `ExpiringCache::set`.

use std::time::Duration;

/// Overrides applied to a single `set` call.
///
/// Unset fields fall back to `DEFAULT_TTL_MS` and the cache's own version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Lifetime in milliseconds
    pub ttl: Option<u64>,
    /// Version tag to stamp instead of the cache's
    pub version: Option<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lifetime in milliseconds.
    #[must_use]
    pub fn ttl_ms(mut self, ttl: u64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the lifetime from a `Duration`.
    #[must_use]
    pub fn ttl(self, ttl: Duration) -> Self {
        self.ttl_ms(ttl.as_millis() as u64)
    }

    /// Stamp the entry with another version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let opts = SetOptions::new().ttl(Duration::from_secs(2)).version("2.0");

        assert_eq!(opts.ttl, Some(2_000));
        assert_eq!(opts.version.as_deref(), Some("2.0"));
    }

    #[test]
    fn test_options_default_empty() {
        let opts = SetOptions::default();
        assert!(opts.ttl.is_none());
        assert!(opts.version.is_none());
    }
}

//! Versioned estimation-config cache.
//!
//! The engine owns no global state beyond this: one explicitly-scoped,
//! explicitly-invalidated cache. Loading happens before any matching run;
//! parallel runs then share the immutable `Arc`. There is no timer-driven
//! refresh — an external collaborator decides when versions change.

use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use super::types::EstimationConfig;

/// Cache holding at most one loaded config
#[derive(Debug, Default)]
pub struct ConfigCache {
    current: RwLock<Option<Arc<EstimationConfig>>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Store a freshly loaded config, replacing any cached one
    pub fn store(&self, config: EstimationConfig) -> Arc<EstimationConfig> {
        let config = Arc::new(config);
        let mut current = self.current.write().unwrap();
        info!(version = %config.version, "estimation config cached");
        *current = Some(Arc::clone(&config));
        config
    }

    /// Get the cached config, if any
    pub fn get(&self) -> Option<Arc<EstimationConfig>> {
        self.current.read().unwrap().clone()
    }

    /// Drop the cached config unconditionally
    pub fn invalidate(&self) {
        let mut current = self.current.write().unwrap();
        if current.take().is_some() {
            debug!("estimation config cache invalidated");
        }
    }

    /// Drop the cached config if its version differs from `version`.
    /// Returns true when an invalidation happened.
    pub fn invalidate_if_changed(&self, version: &str) -> bool {
        let mut current = self.current.write().unwrap();
        match current.as_ref() {
            Some(cached) if cached.version != version => {
                info!(
                    cached = %cached.version,
                    incoming = %version,
                    "config version changed, invalidating cache"
                );
                *current = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::MatchingWeights;
    use std::collections::HashMap;

    fn config(version: &str) -> EstimationConfig {
        EstimationConfig {
            version: version.to_string(),
            categories: HashMap::new(),
            matching: MatchingWeights::default(),
            category_priority: None,
        }
    }

    #[test]
    fn test_store_and_get() {
        let cache = ConfigCache::new();
        assert!(cache.get().is_none());

        cache.store(config("1"));
        assert_eq!(cache.get().unwrap().version, "1");
    }

    #[test]
    fn test_invalidate_only_on_version_change() {
        let cache = ConfigCache::new();
        cache.store(config("1"));

        assert!(!cache.invalidate_if_changed("1"));
        assert!(cache.get().is_some());

        assert!(cache.invalidate_if_changed("2"));
        assert!(cache.get().is_none());

        // Nothing cached: nothing to invalidate.
        assert!(!cache.invalidate_if_changed("2"));
    }

    #[test]
    fn test_unconditional_invalidate() {
        let cache = ConfigCache::new();
        cache.store(config("1"));
        cache.invalidate();
        assert!(cache.get().is_none());
    }
}

//! Service container for dependency injection
//!
//! Wires the navigator from settings and owns the node cache it shares.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::Navigator;
use crate::config::Settings;
use crate::infrastructure::cache::NodeCache;
use crate::infrastructure::InfraResult;

/// Container holding the settings and the shared cache.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Node cache handed to every navigator when `settings.cache` is on
    pub cache: Arc<NodeCache>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self::with_cache(settings, Arc::new(NodeCache::new()))
    }

    /// Create a container around an existing cache (for testing).
    pub fn with_cache(settings: Settings, cache: Arc<NodeCache>) -> Self {
        Self {
            settings: Arc::new(settings),
            cache,
        }
    }

    /// A navigator over the configured tree.
    ///
    /// Fails when the settings name an unknown or malformed configuration.
    pub fn navigator(&self) -> InfraResult<Navigator> {
        let config = self.settings.tree_config()?;
        debug!(%config, cache = self.settings.cache, "navigator");
        let mut nav = Navigator::new(config);
        if self.settings.cache {
            nav = nav.with_cache(Arc::clone(&self.cache));
        }
        if let Some(limit) = self.settings.max_steps {
            nav = nav.with_max_steps(limit);
        }
        Ok(nav)
    }
}

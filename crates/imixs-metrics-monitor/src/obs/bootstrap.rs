//! Process-wide registry lifecycle.
//!
//! `RegistryBootstrap::init` runs once at startup: it creates the registry and
//! publishes it as the process default so independent instrumentation points
//! write into the same storage. Dropping the bootstrap (or calling
//! `shutdown`) unpublishes it again.

use std::sync::RwLock;

use super::metrics::MetricsRegistry;

static GLOBAL: RwLock<Option<MetricsRegistry>> = RwLock::new(None);

/// The currently published process-wide registry, if any.
pub fn global_registry() -> Option<MetricsRegistry> {
    GLOBAL.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Owner of the process-wide registry.
pub struct RegistryBootstrap {
    registry: MetricsRegistry,
}

impl RegistryBootstrap {
    /// Create the registry and publish it globally. A previously published
    /// registry is replaced.
    pub fn init() -> Self {
        let registry = MetricsRegistry::new();
        let previous = GLOBAL
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(registry.clone());
        if previous.is_some() {
            tracing::warn!("replacing previously published metrics registry");
        }
        tracing::info!("metrics registry initialized and registered globally");
        Self { registry }
    }

    /// Handle to the owned registry.
    pub fn registry(&self) -> MetricsRegistry {
        self.registry.clone()
    }

    /// Unpublish and release the registry.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for RegistryBootstrap {
    fn drop(&mut self) {
        let mut slot = GLOBAL.write().unwrap_or_else(|e| e.into_inner());
        // only unpublish our own registry; a newer bootstrap may own the slot
        if slot.as_ref().is_some_and(|r| r.same_as(&self.registry)) {
            *slot = None;
            tracing::info!("metrics registry cleaned up");
        }
    }
}

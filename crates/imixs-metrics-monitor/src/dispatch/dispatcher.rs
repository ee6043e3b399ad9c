use std::sync::Arc;

use dashmap::DashMap;

use imixs_metrics_core::event::{DocumentEvent, ProcessingEvent};

/// Subscriber for document operations (save/load/delete).
pub trait DocumentObserver: Send + Sync {
    fn name(&self) -> &'static str;
    fn on_document_event(&self, event: &DocumentEvent);
}

/// Subscriber for workflow processing phases.
pub trait ProcessingObserver: Send + Sync {
    fn name(&self) -> &'static str;
    fn on_processing_event(&self, event: &ProcessingEvent);
}

/// In-process publish/subscribe hub.
///
/// Delivery is synchronous on the publisher's thread: when `publish_*`
/// returns, every registered observer has seen the event.
#[derive(Default)]
pub struct EventDispatcher {
    document: DashMap<&'static str, Arc<dyn DocumentObserver>>,
    processing: DashMap<&'static str, Arc<dyn ProcessingObserver>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            document: DashMap::new(),
            processing: DashMap::new(),
        }
    }

    /// Register a document observer. Same name replaces the earlier one.
    pub fn register_document(&self, obs: Arc<dyn DocumentObserver>) {
        self.document.insert(obs.name(), obs);
    }

    /// Register a processing observer. Same name replaces the earlier one.
    pub fn register_processing(&self, obs: Arc<dyn ProcessingObserver>) {
        self.processing.insert(obs.name(), obs);
    }

    pub fn registered_document_observers(&self) -> Vec<&'static str> {
        self.document.iter().map(|e| *e.key()).collect()
    }

    pub fn registered_processing_observers(&self) -> Vec<&'static str> {
        self.processing.iter().map(|e| *e.key()).collect()
    }

    pub fn publish_document(&self, event: &DocumentEvent) {
        // snapshot first so observers never run under a shard lock
        let observers: Vec<Arc<dyn DocumentObserver>> =
            self.document.iter().map(|e| e.value().clone()).collect();
        for obs in observers {
            obs.on_document_event(event);
        }
    }

    pub fn publish_processing(&self, event: &ProcessingEvent) {
        let observers: Vec<Arc<dyn ProcessingObserver>> =
            self.processing.iter().map(|e| e.value().clone()).collect();
        for obs in observers {
            obs.on_processing_event(event);
        }
    }
}

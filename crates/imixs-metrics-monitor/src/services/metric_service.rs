//! Event-to-counter adapter.
//!
//! Turns document and processing events into counter increments. Handlers are
//! fail-open: a payload that cannot be turned into labels is logged and
//! dropped, never reported back to the publishing engine.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use imixs_metrics_core::error::{MetricsError, Result};
use imixs_metrics_core::event::{DocumentEvent, ProcessingEvent};

use crate::config::MetricsSection;
use crate::dispatch::{DocumentObserver, ProcessingObserver};
use crate::obs::{sanitize_label_value, Counter, LabelSet, MetricsRegistry};

pub const METRIC_DOCUMENTS: &str = "imixs_documents_total";
pub const METRIC_WORKITEMS: &str = "imixs_workitems_total";
pub const METRIC_TRANSACTIONS: &str = "imixs_transactions_total";

const HELP_DOCUMENTS: &str = "Total number of document operations";
const HELP_WORKITEMS: &str = "Total number of processed workitems";
const HELP_TRANSACTIONS: &str = "Total number of workflow transactions";

/// Scrape body while collection is switched off.
pub const DISABLED_NOTICE: &str = "# Metrics disabled\n";

pub struct MetricService {
    enabled: bool,
    anonymised: bool,
    registry: MetricsRegistry,
    counter_cache: DashMap<String, Arc<Counter>>,
}

impl MetricService {
    pub fn new(settings: &MetricsSection, registry: MetricsRegistry) -> Self {
        if settings.enabled {
            tracing::info!(
                enabled = settings.enabled,
                anonymised = settings.anonymised,
                "metric service initialized"
            );
        }
        Self {
            enabled: settings.enabled,
            anonymised: settings.anonymised,
            registry,
            counter_cache: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_anonymised(&self) -> bool {
        self.anonymised
    }

    pub fn registry(&self) -> &MetricsRegistry {
        &self.registry
    }

    /// Count one workflow transaction or one workitem state change.
    pub fn on_processing_event(&self, event: Option<&ProcessingEvent>) {
        let Some(event) = event else { return; };
        if !self.enabled {
            return;
        }
        match self.workitem_counter(event) {
            Ok(counter) => counter.inc(),
            Err(e) => tracing::warn!(
                error = %e,
                code = e.client_code().as_str(),
                event_type = event.event_type.code(),
                "metric could not be updated"
            ),
        }
    }

    /// Count one document operation.
    pub fn on_document_event(&self, event: Option<&DocumentEvent>) {
        let Some(event) = event else { return; };
        if !self.enabled {
            return;
        }
        match self.document_counter(event) {
            Ok(counter) => counter.inc(),
            Err(e) => tracing::warn!(
                error = %e,
                code = e.client_code().as_str(),
                event_type = event.event_type.code(),
                "metric could not be updated"
            ),
        }
    }

    fn document_counter(&self, event: &DocumentEvent) -> Result<Arc<Counter>> {
        let labels = LabelSet::new().with("method", event.event_type.method());
        self.get_or_create(METRIC_DOCUMENTS, HELP_DOCUMENTS, labels)
    }

    fn workitem_counter(&self, event: &ProcessingEvent) -> Result<Arc<Counter>> {
        if event.event_type.is_before_process() {
            return self.get_or_create(METRIC_TRANSACTIONS, HELP_TRANSACTIONS, LabelSet::new());
        }
        let labels = self.workitem_labels(event)?;
        self.get_or_create(METRIC_WORKITEMS, HELP_WORKITEMS, labels)
    }

    /// Labels for a workitem state change. `user` is added only when not anonymised.
    pub fn workitem_labels(&self, event: &ProcessingEvent) -> Result<LabelSet> {
        let doc = event.document.as_ref().ok_or_else(|| {
            MetricsError::MalformedEvent("processing event carries no workitem".into())
        })?;

        let mut labels = LabelSet::new()
            .with("type", sanitize_label_value(doc.doc_type().as_deref()))
            .with("modelversion", sanitize_label_value(doc.model_version().as_deref()))
            .with("task", doc.task_id()?.to_string())
            .with("workflowgroup", sanitize_label_value(doc.workflow_group().as_deref()))
            .with("workflowstatus", sanitize_label_value(doc.workflow_status().as_deref()))
            .with("event", doc.last_event()?.to_string());

        if !self.anonymised {
            labels.push("user", sanitize_label_value(doc.editor().as_deref()));
        }
        Ok(labels)
    }

    /// Atomic get-or-insert: one `Counter` per cache key for the process lifetime.
    fn get_or_create(&self, name: &str, help: &str, labels: LabelSet) -> Result<Arc<Counter>> {
        let key = labels.cache_key(name);
        if let Some(hit) = self.counter_cache.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }
        match self.counter_cache.entry(key) {
            Entry::Occupied(e) => Ok(Arc::clone(e.get())),
            Entry::Vacant(e) => {
                let counter = self.registry.counter(name, help, &labels)?;
                e.insert(Arc::clone(&counter));
                Ok(counter)
            }
        }
    }

    /// Render the registry, or the disabled notice.
    pub fn scrape(&self) -> Result<String> {
        if !self.enabled {
            return Ok(DISABLED_NOTICE.to_string());
        }
        self.registry.render()
    }

    /// Number of distinct counter identities created so far.
    pub fn cached_metrics_count(&self) -> usize {
        self.counter_cache.len()
    }

    /// Test/debug only. Counters stay registered; the next event re-resolves
    /// them from the registry.
    pub fn clear_cache(&self) {
        self.counter_cache.clear();
    }
}

impl DocumentObserver for MetricService {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn on_document_event(&self, event: &DocumentEvent) {
        MetricService::on_document_event(self, Some(event));
    }
}

impl ProcessingObserver for MetricService {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn on_processing_event(&self, event: &ProcessingEvent) {
        MetricService::on_processing_event(self, Some(event));
    }
}

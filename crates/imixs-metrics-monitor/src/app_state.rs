//! Shared application state for the metrics monitor.
//!
//! Wires the registry, the metric service, and the event dispatcher. The
//! hosting engine publishes through `dispatcher()`; HTTP handlers read
//! through `metric_service()`.

use std::sync::Arc;

use imixs_metrics_core::error::{MetricsError, Result};

use crate::config::MonitorConfig;
use crate::dispatch::EventDispatcher;
use crate::obs::MetricsRegistry;
use crate::services::MetricService;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metric_service: Arc<MetricService>,
    dispatcher: Arc<EventDispatcher>,
}

struct AppStateInner {
    cfg: MonitorConfig,
}

impl AppState {
    /// Build application state around an existing registry handle.
    pub fn new(cfg: MonitorConfig, registry: MetricsRegistry) -> Self {
        let metric_service = Arc::new(MetricService::new(&cfg.metrics, registry));
        let dispatcher = EventDispatcher::new();

        dispatcher.register_document(metric_service.clone());
        dispatcher.register_processing(metric_service.clone());

        if !cfg.metrics.enabled {
            tracing::info!("metrics collection disabled");
        } else if cfg.metrics.api_key.is_empty() {
            tracing::warn!("metrics endpoints are not protected by an API key");
        }

        Self {
            inner: Arc::new(AppStateInner { cfg }),
            metric_service,
            dispatcher: Arc::new(dispatcher),
        }
    }

    pub fn metric_service(&self) -> Arc<MetricService> {
        Arc::clone(&self.metric_service)
    }

    pub fn dispatcher(&self) -> Arc<EventDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Shared-secret check. An empty configured key means open access.
    pub fn authorize(&self, provided: Option<&str>) -> Result<()> {
        let expected = self.inner.cfg.metrics.api_key.as_str();
        if expected.is_empty() || provided == Some(expected) {
            Ok(())
        } else {
            Err(MetricsError::Unauthorized)
        }
    }
}

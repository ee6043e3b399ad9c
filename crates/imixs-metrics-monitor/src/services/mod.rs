//! Built-in event observers.

pub mod metric_service;

pub use metric_service::{
    MetricService, DISABLED_NOTICE, METRIC_DOCUMENTS, METRIC_TRANSACTIONS, METRIC_WORKITEMS,
};

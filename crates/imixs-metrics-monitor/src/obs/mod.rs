//! In-process counter registry and its Prometheus text rendering.
//!
//! - `metrics`   : counters, families, exposition
//! - `labels`    : label sets + value sanitization
//! - `bootstrap` : process-wide publication of the registry

pub mod bootstrap;
pub mod labels;
pub mod metrics;

pub use bootstrap::{global_registry, RegistryBootstrap};
pub use labels::{sanitize_label_value, LabelSet, UNKNOWN};
pub use metrics::{Counter, MetricsRegistry};

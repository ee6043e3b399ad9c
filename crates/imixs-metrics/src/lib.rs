//! Top-level facade crate for imixs-metrics.
//!
//! Re-exports the event model and the monitor so embedders can depend on a
//! single crate.

pub mod core {
    pub use imixs_metrics_core::*;
}

pub mod monitor {
    pub use imixs_metrics_monitor::*;
}

//! imixs-metrics monitor library entry.
//!
//! Event observers turn workflow engine notifications into counters; the
//! registry renders them for Prometheus over a small axum router. Consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;

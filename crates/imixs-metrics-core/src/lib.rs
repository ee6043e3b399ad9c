//! imixs-metrics core: the inbound workflow event model and the error surface
//! shared by the monitor and its embedders.
//!
//! This crate carries no transport or runtime dependencies so a hosting
//! workflow engine can construct and publish events without pulling in the
//! HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed event payloads surface as `MetricsError::MalformedEvent` so the
//! observing side can log and drop them.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod event;

/// Shared result type.
pub use error::{MetricsError, Result};

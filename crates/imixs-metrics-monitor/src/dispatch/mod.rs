//! Dispatcher module exports.
//!
//! Re-exports the event dispatcher and observer traits so the hosting engine
//! can depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{DocumentObserver, EventDispatcher, ProcessingObserver};

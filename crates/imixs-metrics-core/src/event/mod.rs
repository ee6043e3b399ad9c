//! Inbound workflow events (document operations + processing phases).
//!
//! The hosting workflow engine owns and dispatches these; observers only read
//! them. Event-type discriminants keep the engine's integer codes so unknown
//! codes survive as `Other(code)` instead of failing to decode.

pub mod document;
pub mod types;

pub use document::Document;
pub use types::{DocumentEvent, DocumentEventType, ProcessingEvent, ProcessingEventType};

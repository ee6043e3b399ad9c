use serde::{Deserialize, Serialize};

use super::Document;

/// Document operation discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum DocumentEventType {
    Save,
    Load,
    Delete,
    /// Any code the engine emits that has no dedicated variant.
    Other(i32),
}

impl DocumentEventType {
    pub const ON_DOCUMENT_SAVE: i32 = 1;
    pub const ON_DOCUMENT_LOAD: i32 = 2;
    pub const ON_DOCUMENT_DELETE: i32 = 3;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::ON_DOCUMENT_SAVE => Self::Save,
            Self::ON_DOCUMENT_LOAD => Self::Load,
            Self::ON_DOCUMENT_DELETE => Self::Delete,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::Save => Self::ON_DOCUMENT_SAVE,
            Self::Load => Self::ON_DOCUMENT_LOAD,
            Self::Delete => Self::ON_DOCUMENT_DELETE,
            Self::Other(c) => c,
        }
    }

    /// `method` label value.
    pub fn method(self) -> &'static str {
        match self {
            Self::Save => "save",
            Self::Load => "load",
            Self::Delete => "delete",
            Self::Other(_) => "unknown",
        }
    }
}

impl From<i32> for DocumentEventType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<DocumentEventType> for i32 {
    fn from(t: DocumentEventType) -> Self {
        t.code()
    }
}

/// Processing phase discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ProcessingEventType {
    /// Fired once per engine transaction, before any workitem is processed.
    BeforeProcess,
    AfterProcess,
    Other(i32),
}

impl ProcessingEventType {
    pub const BEFORE_PROCESS: i32 = 1;
    pub const AFTER_PROCESS: i32 = 2;

    pub fn from_code(code: i32) -> Self {
        match code {
            Self::BEFORE_PROCESS => Self::BeforeProcess,
            Self::AFTER_PROCESS => Self::AfterProcess,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            Self::BeforeProcess => Self::BEFORE_PROCESS,
            Self::AfterProcess => Self::AFTER_PROCESS,
            Self::Other(c) => c,
        }
    }

    /// True for the pre-transaction phase; everything else is a workitem state change.
    pub fn is_before_process(self) -> bool {
        matches!(self, Self::BeforeProcess)
    }
}

impl From<i32> for ProcessingEventType {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<ProcessingEventType> for i32 {
    fn from(t: ProcessingEventType) -> Self {
        t.code()
    }
}

/// Document operation notification (save/load/delete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentEvent {
    pub event_type: DocumentEventType,
    #[serde(default)]
    pub document: Option<Document>,
}

impl DocumentEvent {
    pub fn new(event_type: DocumentEventType, document: Document) -> Self {
        Self { event_type, document: Some(document) }
    }
}

/// Workflow processing notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingEvent {
    pub event_type: ProcessingEventType,
    #[serde(default)]
    pub document: Option<Document>,
}

impl ProcessingEvent {
    pub fn new(event_type: ProcessingEventType, document: Document) -> Self {
        Self { event_type, document: Some(document) }
    }

    /// Pre-transaction notification; carries no workitem.
    pub fn before_process() -> Self {
        Self { event_type: ProcessingEventType::BeforeProcess, document: None }
    }
}

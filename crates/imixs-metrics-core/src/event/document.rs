//! Workflow record (item collection).
//!
//! Items are stored as JSON values. A list-valued item behaves like its first
//! element, matching how the workflow engine stores multi-value items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MetricsError, Result};

/// Item holding the document type.
pub const ITEM_TYPE: &str = "type";
/// Item holding the model version.
pub const ITEM_MODELVERSION: &str = "$modelversion";
/// Item holding the current task id.
pub const ITEM_TASKID: &str = "$taskid";
/// Item holding the workflow group.
pub const ITEM_WORKFLOWGROUP: &str = "$workflowgroup";
/// Item holding the workflow status.
pub const ITEM_WORKFLOWSTATUS: &str = "$workflowstatus";
/// Item holding the last processed event id.
pub const ITEM_LASTEVENT: &str = "$lastevent";
/// Item holding the current editor.
pub const ITEM_EDITOR: &str = "$editor";

/// A workflow record: document or workitem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    items: BTreeMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.items.insert(name.to_string(), value.into());
    }

    /// Raw item value (first element for list items). `None` when missing or null.
    pub fn item(&self, name: &str) -> Option<&Value> {
        let v = self.items.get(name)?;
        let v = match v {
            Value::Array(list) => list.first()?,
            other => other,
        };
        if v.is_null() { None } else { Some(v) }
    }

    /// Item rendered as text. Strings pass through, numbers and booleans are
    /// formatted; nested values are rendered as compact JSON.
    pub fn item_string(&self, name: &str) -> Option<String> {
        match self.item(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            other => Some(other.to_string()),
        }
    }

    /// Item as integer. Missing items read as `0`.
    pub fn item_integer(&self, name: &str) -> Result<i64> {
        let Some(v) = self.item(name) else { return Ok(0); };
        match v {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .ok_or_else(|| MetricsError::MalformedEvent(format!("item {name} out of range: {n}"))),
            Value::String(s) if s.trim().is_empty() => Ok(0),
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| {
                MetricsError::MalformedEvent(format!("item {name} is not an integer: {s}"))
            }),
            other => Err(MetricsError::MalformedEvent(format!(
                "item {name} is not an integer: {other}"
            ))),
        }
    }

    pub fn doc_type(&self) -> Option<String> {
        self.item_string(ITEM_TYPE)
    }

    pub fn model_version(&self) -> Option<String> {
        self.item_string(ITEM_MODELVERSION)
    }

    pub fn task_id(&self) -> Result<i64> {
        self.item_integer(ITEM_TASKID)
    }

    pub fn workflow_group(&self) -> Option<String> {
        self.item_string(ITEM_WORKFLOWGROUP)
    }

    pub fn workflow_status(&self) -> Option<String> {
        self.item_string(ITEM_WORKFLOWSTATUS)
    }

    pub fn last_event(&self) -> Result<i64> {
        self.item_integer(ITEM_LASTEVENT)
    }

    pub fn editor(&self) -> Option<String> {
        self.item_string(ITEM_EDITOR)
    }
}

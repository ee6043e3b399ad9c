//! Label sets and label value hygiene.

use std::fmt::Write;

/// Replacement for null or blank label values.
pub const UNKNOWN: &str = "unknown";

/// Sanitize a label value: null/blank becomes `unknown`, every character
/// outside `[A-Za-z0-9_-]` becomes `_`. Idempotent.
///
/// Blank means only characters up to U+0020 (controls and space); other
/// Unicode whitespace is replaced like any other character.
pub fn sanitize_label_value(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim_matches(|c: char| c <= ' ').is_empty() => v
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect(),
        _ => UNKNOWN.to_string(),
    }
}

/// Escape a label value for the text exposition format.
pub(crate) fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Ordered label pairs attached to one counter series.
///
/// Insertion order is kept for rendering; identity uses [`LabelSet::canonical`],
/// which sorts the pairs so construction order never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    pairs: Vec<(String, String)>,
}

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. A repeated key overwrites the earlier value in place.
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Pairs sorted by key.
    pub fn canonical(&self) -> Vec<(String, String)> {
        let mut key = self.pairs.clone();
        key.sort();
        key
    }

    /// Sorted label names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pairs.iter().map(|(k, _)| k.clone()).collect();
        names.sort();
        names
    }

    /// Deterministic cache key: metric name followed by the canonical rendering.
    /// Unlabeled sets yield the bare name.
    pub fn cache_key(&self, name: &str) -> String {
        if self.pairs.is_empty() {
            return name.to_string();
        }
        let mut out = String::with_capacity(name.len() + 16 * self.pairs.len());
        out.push_str(name);
        out.push('{');
        for (i, (k, v)) in self.canonical().iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            let _ = write!(out, "{}=\"{}\"", k, escape_label(v));
        }
        out.push('}');
        out
    }
}

//! Counter registry with Prometheus text exposition.
//!
//! Counters are grouped into families by metric name. Each family fixes its
//! help text and label-name schema on first registration; series inside a
//! family are keyed by the sorted label pairs so the same pairs in any order
//! resolve to one `Counter`. Values are `AtomicU64` and rendered as integers.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use imixs_metrics_core::error::{MetricsError, Result};

use super::labels::{escape_label, LabelSet};

/// Monotonic counter. Never decreases.
#[derive(Debug)]
pub struct Counter {
    value: AtomicU64,
    labels: Vec<(String, String)>,
}

impl Counter {
    fn new(labels: &LabelSet) -> Self {
        Self { value: AtomicU64::new(0), labels: labels.pairs().to_vec() }
    }

    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

struct CounterFamily {
    help: String,
    label_names: Vec<String>,
    series: DashMap<Vec<(String, String)>, Arc<Counter>>,
}

impl CounterFamily {
    fn render(&self, name: &str, out: &mut String) -> std::fmt::Result {
        writeln!(out, "# HELP {} {}", name, escape_help(&self.help))?;
        writeln!(out, "# TYPE {} counter", name)?;

        let mut rows: Vec<(Vec<(String, String)>, Arc<Counter>)> = self
            .series
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));

        for (_, counter) in rows {
            let val = counter.get();
            if counter.labels.is_empty() {
                writeln!(out, "{} {}", name, val)?;
                continue;
            }
            let label_str = counter.labels.iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>().join(",");
            writeln!(out, "{}{{{}}} {}", name, label_str, val)?;
        }
        Ok(())
    }
}

#[derive(Default)]
struct RegistryInner {
    families: DashMap<String, Arc<CounterFamily>>,
}

/// Shared counter registry. Clones point at the same storage.
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    inner: Arc<RegistryInner>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the counter for `(name, labels)`.
    ///
    /// The first registration of a name fixes its help text and label names;
    /// a later call with a different label-name set is rejected.
    pub fn counter(&self, name: &str, help: &str, labels: &LabelSet) -> Result<Arc<Counter>> {
        if !is_valid_metric_name(name) {
            return Err(MetricsError::Registration(format!("invalid metric name: {name}")));
        }
        if let Some((bad, _)) = labels.pairs().iter().find(|(k, _)| !is_valid_label_name(k)) {
            return Err(MetricsError::Registration(format!(
                "invalid label name on {name}: {bad}"
            )));
        }

        let label_names = labels.names();
        let family = self
            .inner
            .families
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(CounterFamily {
                    help: help.to_string(),
                    label_names: label_names.clone(),
                    series: DashMap::new(),
                })
            })
            .value()
            .clone();

        if family.label_names != label_names {
            return Err(MetricsError::Registration(format!(
                "{name} already registered with labels [{}], got [{}]",
                family.label_names.join(","),
                label_names.join(",")
            )));
        }

        let counter = family
            .series
            .entry(labels.canonical())
            .or_insert_with(|| Arc::new(Counter::new(labels)))
            .value()
            .clone();
        Ok(counter)
    }

    /// Number of registered metric names.
    pub fn family_count(&self) -> usize {
        self.inner.families.len()
    }

    /// Number of distinct series across all families.
    pub fn series_count(&self) -> usize {
        self.inner.families.iter().map(|f| f.series.len()).sum()
    }

    /// Render in Prometheus text exposition format (version 0.0.4).
    pub fn render(&self) -> Result<String> {
        let mut families: Vec<(String, Arc<CounterFamily>)> = self
            .inner
            .families
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        families.sort_by(|a, b| a.0.cmp(&b.0));

        let mut out = String::new();
        for (name, family) in families {
            family
                .render(&name, &mut out)
                .map_err(|e| MetricsError::Render(format!("{name}: {e}")))?;
        }
        Ok(out)
    }

    /// True when both handles share storage.
    pub fn same_as(&self, other: &MetricsRegistry) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn is_valid_label_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

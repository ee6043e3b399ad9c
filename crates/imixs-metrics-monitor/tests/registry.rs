#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use imixs_metrics_monitor::obs::{sanitize_label_value, LabelSet, MetricsRegistry};

#[test]
fn sanitize_is_total_and_idempotent() {
    assert_eq!(sanitize_label_value(None), "unknown");
    assert_eq!(sanitize_label_value(Some("")), "unknown");
    assert_eq!(sanitize_label_value(Some("   ")), "unknown");
    assert_eq!(sanitize_label_value(Some("a b/c")), "a_b_c");
    assert_eq!(sanitize_label_value(Some("Approval-2_x")), "Approval-2_x");
    assert_eq!(sanitize_label_value(Some("grüße")), "gr__e");

    // blank = only chars up to U+0020
    assert_eq!(sanitize_label_value(Some("\u{1}\t\n ")), "unknown");
    assert_eq!(sanitize_label_value(Some("\u{a0}")), "_");
    assert_eq!(sanitize_label_value(Some("\u{2003}x")), "_x");

    for x in ["", " ", "\u{1}", "\u{a0}", "a b/c", "x\"y\\z", "ok", "ä.ö", "unknown"] {
        let once = sanitize_label_value(Some(x));
        assert_eq!(sanitize_label_value(Some(&once)), once, "input={x:?}");
    }
}

#[test]
fn label_order_does_not_change_identity() {
    let reg = MetricsRegistry::new();
    let a = LabelSet::new().with("type", "invoice").with("task", "10");
    let b = LabelSet::new().with("task", "10").with("type", "invoice");
    assert_eq!(a.cache_key("m_total"), b.cache_key("m_total"));

    let ca = reg.counter("m_total", "help", &a).unwrap();
    let cb = reg.counter("m_total", "help", &b).unwrap();
    assert!(Arc::ptr_eq(&ca, &cb));

    ca.inc();
    cb.inc();
    assert_eq!(ca.get(), 2);
    assert_eq!(reg.series_count(), 1);
}

#[test]
fn unlabeled_cache_key_is_the_name() {
    assert_eq!(LabelSet::new().cache_key("imixs_transactions_total"), "imixs_transactions_total");
}

#[test]
fn render_text_format() {
    let reg = MetricsRegistry::new();
    reg.counter("b_total", "Bees", &LabelSet::new()).unwrap().add(3);
    let labels = LabelSet::new().with("method", "load").with("kind", "x\"y");
    reg.counter("a_total", "Ays\nmore", &labels).unwrap().inc();

    let out = reg.render().unwrap();
    let expected = "# HELP a_total Ays\\nmore\n\
# TYPE a_total counter\n\
a_total{method=\"load\",kind=\"x\\\"y\"} 1\n\
# HELP b_total Bees\n\
# TYPE b_total counter\n\
b_total 3\n";
    assert_eq!(out, expected);
}

#[test]
fn series_sorted_within_family() {
    let reg = MetricsRegistry::new();
    reg.counter("d_total", "h", &LabelSet::new().with("method", "save")).unwrap().inc();
    reg.counter("d_total", "h", &LabelSet::new().with("method", "load")).unwrap().inc();

    let out = reg.render().unwrap();
    let load = out.find("d_total{method=\"load\"} 1").unwrap();
    let save = out.find("d_total{method=\"save\"} 1").unwrap();
    assert!(load < save);
    assert_eq!(out.matches("# TYPE d_total counter").count(), 1);
}

#[test]
fn label_schema_mismatch_rejected() {
    let reg = MetricsRegistry::new();
    reg.counter("w_total", "h", &LabelSet::new().with("type", "a")).unwrap();
    let err = reg
        .counter("w_total", "h", &LabelSet::new().with("type", "a").with("user", "bob"))
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "REGISTRATION");
}

#[test]
fn invalid_names_rejected() {
    let reg = MetricsRegistry::new();
    assert!(reg.counter("9bad", "h", &LabelSet::new()).is_err());
    assert!(reg.counter("ok_total", "h", &LabelSet::new().with("bad-label", "v")).is_err());
    assert_eq!(reg.family_count(), 0);
}

#[test]
fn clones_share_storage() {
    let reg = MetricsRegistry::new();
    let other = reg.clone();
    other.counter("x_total", "h", &LabelSet::new()).unwrap().inc();
    assert!(reg.same_as(&other));
    assert!(!reg.same_as(&MetricsRegistry::new()));
    assert!(reg.render().unwrap().contains("x_total 1\n"));
}

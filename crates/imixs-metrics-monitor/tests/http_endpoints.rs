#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use imixs_metrics_core::event::{
    Document, DocumentEvent, DocumentEventType, ProcessingEvent, ProcessingEventType,
};
use imixs_metrics_monitor::app_state::AppState;
use imixs_metrics_monitor::obs::MetricsRegistry;
use imixs_metrics_monitor::{config, router};

fn state(yaml: &str) -> AppState {
    let cfg = config::load_from_str(yaml).unwrap();
    AppState::new(cfg, MetricsRegistry::new())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let res = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = res.status();
    let ctype = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, ctype, String::from_utf8(body.to_vec()).unwrap())
}

fn publish_docs(state: &AppState) {
    let d = state.dispatcher();
    for _ in 0..3 {
        d.publish_document(&DocumentEvent::new(DocumentEventType::Load, Document::new()));
    }
    d.publish_document(&DocumentEvent::new(DocumentEventType::Save, Document::new()));
}

const OPEN: &str = "version: 1\nmetrics:\n  enabled: true\n";
const SECURED: &str = "version: 1\nmetrics:\n  enabled: true\n  api_key: \"s3cret\"\n";

#[tokio::test]
async fn scrape_open_endpoint() {
    let st = state(OPEN);
    publish_docs(&st);
    let app = router::build_router(st);

    let (status, ctype, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("text/plain; version=0.0.4; charset=utf-8"));
    assert!(body.contains("imixs_documents_total{method=\"load\"} 3\n"), "{body}");
    assert!(body.contains("imixs_documents_total{method=\"save\"} 1\n"), "{body}");
}

#[tokio::test]
async fn end_to_end_workitem_scenario() {
    let st = state("version: 1\nmetrics:\n  enabled: true\n  anonymised: true\n");
    let d = st.dispatcher();
    d.publish_processing(&ProcessingEvent::before_process());
    d.publish_processing(&ProcessingEvent::new(
        ProcessingEventType::AfterProcess,
        Document::new()
            .with("type", "invoice")
            .with("$taskid", 10)
            .with("$workflowgroup", "Approval")
            .with("$workflowstatus", "open")
            .with("$lastevent", 20),
    ));
    let app = router::build_router(st);

    let (status, _, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("imixs_transactions_total 1\n"), "{body}");
    assert!(body.contains(
        "imixs_workitems_total{type=\"invoice\",modelversion=\"unknown\",task=\"10\",workflowgroup=\"Approval\",workflowstatus=\"open\",event=\"20\"} 1\n"
    ), "{body}");
}

#[tokio::test]
async fn secured_scrape_requires_key() {
    let st = state(SECURED);
    publish_docs(&st);
    let app = router::build_router(st);

    for uri in ["/metrics", "/metrics?key=wrong", "/metrics?key="] {
        let (status, _, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "uri={uri}");
        assert_eq!(body, "# Unauthorized: Invalid or missing API key", "uri={uri}");
        assert!(!body.contains("imixs_"), "uri={uri}");
    }

    let (status, _, body) = get(&app, "/metrics?key=s3cret").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("imixs_documents_total{method=\"load\"} 3\n"), "{body}");
}

#[tokio::test]
async fn disabled_scrape_returns_notice() {
    let st = state("version: 1\n");
    publish_docs(&st);
    let count = st.metric_service().cached_metrics_count();
    let app = router::build_router(st);

    let (status, _, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "# Metrics disabled\n");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn stats_reports_identity_count() {
    let st = state(SECURED);
    publish_docs(&st);
    let app = router::build_router(st);

    let (status, _, body) = get(&app, "/metrics/stats").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let err: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err["error"], "Invalid or missing API key");

    let (status, ctype, body) = get(&app, "/metrics/stats?key=s3cret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("application/json"));
    let stats: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(stats["metricsCount"], 2);
    assert!(stats["timestamp"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn healthz_ok() {
    let app = router::build_router(state(OPEN));
    let (status, _, body) = get(&app, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn repeated_key_uses_first_value() {
    let st = state(SECURED);
    publish_docs(&st);
    let app = router::build_router(st);

    let (status, _, body) = get(&app, "/metrics?key=a&key=s3cret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, "# Unauthorized: Invalid or missing API key");

    let (status, _, body) = get(&app, "/metrics/stats?key=a&key=s3cret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let err: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(err["error"], "Invalid or missing API key");

    let (status, _, body) = get(&app, "/metrics?key=s3cret&key=a").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("imixs_documents_total{method=\"save\"} 1\n"), "{body}");

    let (status, _, body) = get(&app, "/metrics/stats?key=s3cret&key=a").await;
    assert_eq!(status, StatusCode::OK);
    let stats: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(stats["metricsCount"], 2);
}

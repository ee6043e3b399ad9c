//! Operational HTTP endpoints.
//!
//! - `/healthz`       : liveness
//! - `/metrics`       : Prometheus text format (optionally `?key=`)
//! - `/metrics/stats` : cached counter count + timestamp as JSON

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::app_state::AppState;

pub const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const PLAIN_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Query pairs as sent; repeated names are kept in order.
pub type KeyQuery = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// First `key` value, if any. An unparsable query string carries no key.
fn provided_key(q: KeyQuery) -> Option<String> {
    let Query(pairs) = q.ok()?;
    pairs.into_iter().find(|(k, _)| k == "key").map(|(_, v)| v)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricStats {
    pub metrics_count: usize,
    pub timestamp: u64,
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>, q: KeyQuery) -> Response {
    if let Err(e) = state.authorize(provided_key(q).as_deref()) {
        tracing::debug!(code = e.client_code().as_str(), "metrics scrape rejected");
        return (
            StatusCode::UNAUTHORIZED,
            [(header::CONTENT_TYPE, PLAIN_CONTENT_TYPE)],
            "# Unauthorized: Invalid or missing API key",
        )
            .into_response();
    }

    match state.metric_service().scrape() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "metrics scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, PLAIN_CONTENT_TYPE)],
                format!("# Error generating metrics: {e}\n"),
            )
                .into_response()
        }
    }
}

pub async fn stats(State(state): State<AppState>, q: KeyQuery) -> Response {
    if let Err(e) = state.authorize(provided_key(q).as_deref()) {
        tracing::debug!(code = e.client_code().as_str(), "metrics stats rejected");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid or missing API key" })),
        )
            .into_response();
    }

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    Json(MetricStats {
        metrics_count: state.metric_service().cached_metrics_count(),
        timestamp,
    })
    .into_response()
}

//! imixs-metrics monitor
//!
//! - `GET /metrics`       : Prometheus scrape endpoint
//! - `GET /metrics/stats` : counter cache stats
//! - Config: YAML file (`IMIXS_METRICS_CONFIG`) + `METRICS_*` env overrides

use tracing_subscriber::{fmt, EnvFilter};

use imixs_metrics_core::error::{MetricsError, Result};
use imixs_metrics_monitor::{app_state, config, obs::RegistryBootstrap, router};

const CONFIG_ENV: &str = "IMIXS_METRICS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "imixs-metrics.yaml";

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "imixs-metrics-monitor failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load(&path)?;
    let listen = cfg.server.listen_addr()?;

    let bootstrap = RegistryBootstrap::init();
    let state = app_state::AppState::new(cfg, bootstrap.registry());
    let app = router::build_router(state);

    tracing::info!(%listen, "imixs-metrics-monitor starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricsError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MetricsError::Internal(format!("server failed: {e}")))?;

    bootstrap.shutdown();
    tracing::info!("imixs-metrics-monitor stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler failed");
    }
}

//! Metrics implementation using Prometheus.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_hub_core::{Error, Result};

/// Initialize Prometheus recorder and return the handle.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();

    let handle = builder
        .install_recorder()
        .map_err(|e| Error::initialization(format!("Failed to install Prometheus recorder: {}", e)))?;

    tracing::info!("Prometheus metrics recorder initialized");
    Ok(handle)
}

/// Track one completed dispatch (count and latency).
pub fn track_dispatch(modality: &str, outcome: &str, latency_sec: f64) {
    metrics::counter!(
        "dispatch_total",
        "modality" => modality.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    metrics::histogram!(
        "dispatch_duration_seconds",
        "modality" => modality.to_string()
    )
    .record(latency_sec);
}

/// Track one adapter invocation.
pub fn track_adapter(adapter: &str, outcome: &str, latency_sec: f64) {
    metrics::counter!(
        "adapter_calls_total",
        "adapter" => adapter.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    metrics::histogram!("adapter_duration_seconds", "adapter" => adapter.to_string()).record(latency_sec);
}

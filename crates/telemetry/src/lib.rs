//! Logging, tracing and metrics for Service Hub.
//!
//! This crate provides:
//! - Subscriber setup (env filter, plain or JSON output, optional OTLP export)
//! - Prometheus recorder installation
//! - Dispatch and adapter metric helpers

pub mod metrics;
pub mod tracing_layer;

pub use metrics::{setup_metrics_recorder, track_adapter, track_dispatch};
pub use tracing_layer::configure_tracing;

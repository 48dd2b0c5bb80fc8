//! Service Hub - multimodal request router.
//!
//! Accepts text, audio and document requests over HTTP, classifies text by
//! intent, and dispatches each request to exactly one remote service.

use std::sync::Arc;

use service_hub_core::config::AppConfig;
use service_hub_gateway::{BufferedCapture, Dispatcher, GatewayServer, PdfTextExtractor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    // Initialize tracing
    service_hub_telemetry::configure_tracing(config.telemetry.json_logs)?;

    tracing::info!("Starting Service Hub v{}", env!("CARGO_PKG_VERSION"));

    // =========================================================================
    // Session clients
    // =========================================================================
    let remote = match service_hub_backends::connect(&config).await {
        Ok(remote) => remote,
        Err(e) => {
            tracing::error!(error = %e, "Backend initialization failed; no requests will be accepted");
            return Err(e.into());
        }
    };

    // Audio arrives as uploads; without one there is nothing to capture.
    let clients = remote.into_service_clients(
        Arc::new(BufferedCapture::default()),
        Arc::new(PdfTextExtractor::new()),
    );

    let dispatcher = Dispatcher::new(config.services.clone());

    // =========================================================================
    // Start the server
    // =========================================================================
    let mut server = GatewayServer::new(config.server.clone(), dispatcher, clients);

    if config.telemetry.metrics_enabled {
        let metrics_handle = service_hub_telemetry::setup_metrics_recorder()?;
        server = server.with_metrics(metrics_handle);
    }

    server.run().await?;

    Ok(())
}

//! Axum-based HTTP front for the dispatcher.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use service_hub_core::{
    config::ServerConfig,
    types::{encoding::base64_bytes, Intent, TranslationDirection, UserRequest},
    Error, ErrorKind, Result, ServiceClients, ServiceResult,
};

use crate::audio::BufferedCapture;
use crate::dispatcher::Dispatcher;

/// Recording length used when an audio upload does not specify one.
pub const DEFAULT_AUDIO_SECONDS: u8 = 5;

/// Shared application state.
pub struct AppState {
    pub dispatcher: Dispatcher,
    /// Session-wide client handles.
    pub clients: ServiceClients,
}

/// Gateway server.
pub struct GatewayServer {
    config: ServerConfig,
    state: Arc<AppState>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(config: ServerConfig, dispatcher: Dispatcher, clients: ServiceClients) -> Self {
        Self {
            config,
            state: Arc::new(AppState { dispatcher, clients }),
            metrics_handle: None,
        }
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/health", get(health_handler))
            .route("/v1/classify", post(classify_handler))
            .route("/v1/text", post(text_handler))
            .route("/v1/audio", post(audio_handler))
            .route("/v1/document", post(document_handler))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes))
            .with_state(self.state.clone());

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        if self.config.enable_cors {
            router = router.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::initialization(format!("Failed to bind {}: {}", addr, e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}

// =============================================================================
// Request/Response Types
// =============================================================================

/// Text request.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
    /// Translation direction; the configured default when absent.
    pub direction: Option<TranslationDirection>,
    /// Skip classification and route under this intent.
    pub intent: Option<Intent>,
}

/// Classification request.
#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

/// Classification response.
#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub trace_id: String,
    pub intent: Intent,
    pub residual: String,
}

/// Audio upload parameters.
#[derive(Debug, Deserialize)]
pub struct AudioParams {
    pub duration_seconds: Option<u8>,
}

/// Document question with the PDF base64-encoded.
#[derive(Debug, Deserialize)]
pub struct DocumentRequest {
    #[serde(with = "base64_bytes")]
    pub document: Vec<u8>,
    pub question: String,
}

/// Result of one dispatch.
#[derive(Debug, Serialize)]
pub struct DispatchResponse {
    /// Trace ID for this request.
    pub trace_id: String,
    /// Resolved intent, for text requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    pub result: ServiceResult,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// HTTP status for a dispatch result.
pub fn status_for(result: &ServiceResult) -> StatusCode {
    match result {
        ServiceResult::Failure { kind, .. } => match kind {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Capture => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Invocation | ErrorKind::Transport | ErrorKind::Parsing => StatusCode::BAD_GATEWAY,
            ErrorKind::Initialization => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
        _ => StatusCode::OK,
    }
}

fn respond(trace_id: String, intent: Option<Intent>, result: ServiceResult) -> impl IntoResponse {
    let status = status_for(&result);

    if let ServiceResult::Failure { kind, message } = &result {
        tracing::warn!(trace_id = %trace_id, kind = %kind, message = %message, "Request failed");
    } else {
        tracing::info!(trace_id = %trace_id, outcome = result.outcome(), "Request completed");
    }

    (
        status,
        Json(DispatchResponse {
            trace_id,
            intent,
            result,
        }),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check handler.
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Intent classification handler (for debugging/testing).
async fn classify_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ClassifyRequest>,
) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();
    let classification = state.dispatcher.classifier().classify(&payload.text);

    Json(ClassifyResponse {
        trace_id,
        intent: classification.intent,
        residual: classification.residual,
    })
}

/// Text handler.
async fn text_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TextRequest>,
) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();
    let direction = payload
        .direction
        .unwrap_or_else(|| state.dispatcher.default_direction());

    tracing::info!(
        trace_id = %trace_id,
        text_len = payload.text.len(),
        forced_intent = ?payload.intent,
        "Processing text request"
    );

    match payload.intent {
        Some(intent) => {
            let result = state
                .dispatcher
                .dispatch_intent(&payload.text, intent, direction, &state.clients)
                .await;
            respond(trace_id, Some(intent), result)
        }
        None => {
            let intent = (!payload.text.trim().is_empty())
                .then(|| state.dispatcher.classifier().detect_intent(&payload.text));
            let request = UserRequest::text_with_direction(payload.text, direction);
            let result = state.dispatcher.dispatch(&request, &state.clients).await;
            respond(trace_id, intent, result)
        }
    }
}

/// Audio handler: the body is a WAV file or raw PCM16 mono 16 kHz.
async fn audio_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AudioParams>,
    body: Bytes,
) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();
    let duration_seconds = params.duration_seconds.unwrap_or(DEFAULT_AUDIO_SECONDS);

    tracing::info!(
        trace_id = %trace_id,
        upload_bytes = body.len(),
        duration_seconds,
        "Processing audio request"
    );

    let capture = match BufferedCapture::from_upload(&body) {
        Ok(capture) => capture,
        Err(e) => {
            return respond(
                trace_id,
                None,
                ServiceResult::from_error("Error capturing audio", &e),
            )
        }
    };

    let clients = state.clients.clone().with_capture(Arc::new(capture));
    let result = state
        .dispatcher
        .dispatch(&UserRequest::audio(duration_seconds), &clients)
        .await;

    respond(trace_id, None, result)
}

/// Document question handler.
async fn document_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DocumentRequest>,
) -> impl IntoResponse {
    let trace_id = Uuid::new_v4().to_string();

    tracing::info!(
        trace_id = %trace_id,
        document_bytes = payload.document.len(),
        "Processing document request"
    );

    let request = UserRequest::document(payload.document, payload.question);
    let result = state.dispatcher.dispatch(&request, &state.clients).await;

    respond(trace_id, None, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&ServiceResult::text("ok")), StatusCode::OK);
        assert_eq!(
            status_for(&ServiceResult::failure(ErrorKind::Transport, "404")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&ServiceResult::failure(ErrorKind::InvalidRequest, "empty")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&ServiceResult::failure(ErrorKind::Capture, "mic")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}

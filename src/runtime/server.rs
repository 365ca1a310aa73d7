//! Local invocation runtime.
//!
//! # Responsibilities
//! - Accept raw invocation events on the function invoke path
//! - Emulate the load balancer for every other path
//! - Run the synchronous adapter off the async workers
//! - Enforce body limits and request timeouts at the transport
//!
//! # Design Decisions
//! - One shared `Arc<Adapter>`; the adapter holds no per-call state
//! - A panicking handler fails its own request only

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::adapter::{Adapter, Handler};
use crate::config::schema::RuntimeConfig;
use crate::event::{InboundEvent, OutboundEvent};
use crate::http::headers::HeaderMode;
use crate::runtime::emulator::{event_from_request, response_from_event};

/// Path the function invoke API listens on.
pub const INVOKE_PATH: &str = "/2015-03-31/functions/function/invocations";

/// Response header carrying the per-invocation ID.
pub const REQUEST_ID_HEADER: &str = "lambda-runtime-aws-request-id";

/// State injected into handlers.
struct AppState<H> {
    adapter: Arc<Adapter<H>>,
    forwarded_proto: Arc<str>,
    max_event_bytes: usize,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            forwarded_proto: self.forwarded_proto.clone(),
            max_event_bytes: self.max_event_bytes,
        }
    }
}

/// HTTP server standing in for the invocation transport.
pub struct InvokeServer {
    router: Router,
    mode: HeaderMode,
}

impl InvokeServer {
    pub fn new<H: Handler + 'static>(adapter: Adapter<H>, config: RuntimeConfig) -> Self {
        Self::from_shared(Arc::new(adapter), config)
    }

    pub fn from_shared<H: Handler + 'static>(adapter: Arc<Adapter<H>>, config: RuntimeConfig) -> Self {
        let mode = adapter.mode();
        let state = AppState {
            adapter,
            forwarded_proto: Arc::from(config.forwarded_proto.as_str()),
            max_event_bytes: config.max_event_bytes,
        };
        Self {
            router: Self::build_router(&config, state),
            mode,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router<H: Handler + 'static>(config: &RuntimeConfig, state: AppState<H>) -> Router {
        Router::new()
            .route(INVOKE_PATH, post(invoke_handler::<H>))
            .fallback(emulate_handler::<H>)
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.max_event_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> io::Result<()> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = self.mode.as_str(),
            invoke_path = INVOKE_PATH,
            "Invocation runtime starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Invocation runtime stopped");
        Ok(())
    }
}

/// Raw invoke API: event JSON in, outbound event JSON out.
async fn invoke_handler<H: Handler + 'static>(State(state): State<AppState<H>>, body: Bytes) -> Response {
    let request_id = Uuid::new_v4().to_string();

    let event: InboundEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(request_id = %request_id, error = %err, "Rejected malformed invocation event");
            return error_response(StatusCode::BAD_REQUEST, "InvalidEvent", &err.to_string());
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %event.http_method,
        path = %event.path,
        "Invocation received"
    );

    let mut response = match run_adapter(state.adapter, event).await {
        Ok(outbound) => Json(outbound).into_response(),
        Err(response) => response,
    };
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Load balancer emulation: HTTP in, event through the adapter, HTTP out.
async fn emulate_handler<H: Handler + 'static>(State(state): State<AppState<H>>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = match axum::body::to_bytes(body, state.max_event_bytes).await {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(error = %err, "Request body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let event = event_from_request(&parts, &body, state.adapter.mode(), &state.forwarded_proto);
    let outbound = match run_adapter(state.adapter, event).await {
        Ok(outbound) => outbound,
        Err(response) => return response,
    };

    match response_from_event(&outbound) {
        Ok(response) => response.map(Body::from),
        Err(err) => {
            tracing::error!(error = %err, status = outbound.status_code, "Invalid invocation response");
            (StatusCode::BAD_GATEWAY, "Invalid invocation response").into_response()
        }
    }
}

async fn run_adapter<H: Handler + 'static>(
    adapter: Arc<Adapter<H>>,
    event: InboundEvent,
) -> Result<OutboundEvent, Response> {
    tokio::task::spawn_blocking(move || adapter.handle(event))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "Handler did not complete");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "HandlerFailed", "handler did not complete")
        })
}

fn error_response(status: StatusCode, kind: &str, message: &str) -> Response {
    let body = json!({
        "errorType": kind,
        "errorMessage": message,
    });
    (status, Json(body)).into_response()
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

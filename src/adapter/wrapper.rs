//! Decode → serve → encode orchestration.

use std::time::Instant;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};

use crate::adapter::handler::Handler;
use crate::config::schema::AdapterConfig;
use crate::event::{InboundEvent, OutboundEvent};
use crate::http::error::DecodeError;
use crate::http::headers::HeaderMode;
use crate::http::recorder::ResponseRecorder;
use crate::http::request::decode_request;
use crate::http::response::encode_response;
use crate::observability::metrics;

/// Runs a [`Handler`] behind load balancer invocation events.
#[derive(Debug, Clone)]
pub struct Adapter<H> {
    handler: H,
    mode: HeaderMode,
}

impl<H: Handler> Adapter<H> {
    pub fn new(handler: H, mode: HeaderMode) -> Self {
        Self { handler, mode }
    }

    /// Wrap a handler in single-value header mode.
    pub fn wrap(handler: H) -> Self {
        Self::new(handler, HeaderMode::Single)
    }

    pub fn from_config(handler: H, config: &AdapterConfig) -> Self {
        Self::new(handler, config.header_mode())
    }

    /// Switch header mode to match the target group's setting.
    pub fn multi_value_headers(mut self, enabled: bool) -> Self {
        self.mode = HeaderMode::from_multi_value(enabled);
        self
    }

    pub fn mode(&self) -> HeaderMode {
        self.mode
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Serve one invocation, surfacing decode failures to the caller.
    pub fn try_handle(&self, event: InboundEvent) -> Result<OutboundEvent, DecodeError> {
        let start = Instant::now();
        let method = event.http_method.clone();
        let path = event.path.clone();

        let request = match decode_request(event, self.mode) {
            Ok(request) => request,
            Err(err) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    kind = err.kind(),
                    error = %err,
                    "Invocation event could not be decoded"
                );
                metrics::record_decode_error(err.kind());
                return Err(err);
            }
        };
        let mut recorder = ResponseRecorder::new();
        self.handler.serve(request, &mut recorder);
        let outbound = encode_response(recorder.into_response(), self.mode);

        tracing::debug!(
            method = %method,
            path = %path,
            status = outbound.status_code,
            mode = self.mode.as_str(),
            "Invocation served"
        );
        metrics::record_invocation(self.mode, outbound.status_code, start);
        Ok(outbound)
    }

    /// Serve one invocation. Never fails: an undecodable event becomes a
    /// `502 Bad Gateway` response.
    pub fn handle(&self, event: InboundEvent) -> OutboundEvent {
        let start = Instant::now();
        self.try_handle(event).unwrap_or_else(|err| {
            let outbound = decode_failure(&err, self.mode);
            metrics::record_invocation(self.mode, outbound.status_code, start);
            outbound
        })
    }
}

/// Well-formed outbound event reporting a decode failure.
pub fn decode_failure(err: &DecodeError, mode: HeaderMode) -> OutboundEvent {
    let mut response = Response::new(Bytes::from(format!("{}\n", err)));
    *response.status_mut() = StatusCode::BAD_GATEWAY;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
    encode_response(response, mode)
}

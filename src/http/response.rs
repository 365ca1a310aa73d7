//! Generic response → outbound event.
//!
//! # Design Decisions
//! - The body is always base64 text and `isBase64Encoded` is always set
//! - Single mode drops every value after the first for a repeated header

use bytes::Bytes;
use http::{Response, StatusCode};

use crate::event::{OutboundEvent, ResponseHeaders};
use crate::http::body::encode_body;
use crate::http::headers::HeaderMode;

/// Encode a handler's response for the load balancer.
pub fn encode_response(response: Response<Bytes>, mode: HeaderMode) -> OutboundEvent {
    let (parts, body) = response.into_parts();
    OutboundEvent {
        status_code: parts.status.as_u16(),
        status_description: status_description(parts.status),
        headers: ResponseHeaders::from_header_map(&parts.headers, mode),
        body: encode_body(&body),
        is_base64_encoded: true,
    }
}

/// `"200 OK"`; codes without a registered reason render as just the number.
pub fn status_description(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

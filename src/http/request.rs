//! Inbound event → generic request.
//!
//! # Responsibilities
//! - Validate the method token
//! - Normalize headers per mode and look up `host` / `x-forwarded-proto`
//! - Reconstruct the absolute request URL
//! - Decode the body
//!
//! # Design Decisions
//! - Any failure aborts the decode; a half-built request never reaches the
//!   handler
//! - The load balancer's request context rides along as a request extension

use bytes::Bytes;
use http::header::HeaderMap;
use http::{Method, Request};

use crate::event::InboundEvent;
use crate::http::body::decode_body;
use crate::http::error::DecodeError;
use crate::http::headers::HeaderMode;
use crate::http::url::reconstruct_url;

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const HOST: &str = "host";

/// Build the generic request a handler will see.
pub fn decode_request(event: InboundEvent, mode: HeaderMode) -> Result<Request<Bytes>, DecodeError> {
    let method = Method::from_bytes(event.http_method.as_bytes())
        .map_err(|_| DecodeError::InvalidMethod(event.http_method.clone()))?;

    let headers = event.header_map(mode)?;
    let proto = required_header(&headers, X_FORWARDED_PROTO)?;
    let host = required_header(&headers, HOST)?;

    let uri = reconstruct_url(proto, host, &event.path, &event.query_parameters())?;

    let body = decode_body(&event.body, event.is_base64_encoded)?;

    let mut request = Request::new(body);
    *request.method_mut() = method;
    *request.uri_mut() = uri;
    *request.headers_mut() = headers;
    if let Some(context) = event.request_context {
        request.extensions_mut().insert(context);
    }
    Ok(request)
}

fn required_header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, DecodeError> {
    let value = headers.get(name).ok_or(DecodeError::MissingHeader(name))?;
    value.to_str().map_err(|_| DecodeError::InvalidHeader {
        name: name.to_string(),
    })
}

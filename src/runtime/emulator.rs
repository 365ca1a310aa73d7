//! Load balancer emulation: plain HTTP ↔ invocation events.
//!
//! # Responsibilities
//! - Describe an incoming HTTP request as the load balancer would
//! - Turn an outbound event back into the HTTP response the client sees
//!
//! # Design Decisions
//! - Header names are lowercased, as the load balancer delivers them
//! - Single mode keeps the last value of a repeated header or query key
//! - Bodies that are not UTF-8 travel as padded base64

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, HOST};
use http::request::Parts;
use http::{Response, StatusCode};
use thiserror::Error;
use url::form_urlencoded;

use crate::event::{InboundEvent, OutboundEvent};
use crate::http::error::DecodeError;
use crate::http::headers::HeaderMode;
use crate::http::request::X_FORWARDED_PROTO;

#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("invalid status code {0}")]
    InvalidStatus(u16),

    #[error("invalid response header {0:?}")]
    InvalidHeader(String),

    #[error("undecodable response body: {0}")]
    Body(#[from] DecodeError),
}

/// Build the event the load balancer would deliver for this request.
pub fn event_from_request(parts: &Parts, body: &[u8], mode: HeaderMode, forwarded_proto: &str) -> InboundEvent {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in parts.headers.iter() {
        headers
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    if !headers.contains_key(HOST.as_str()) {
        if let Some(authority) = parts.uri.authority() {
            headers.insert(HOST.as_str().to_string(), vec![authority.to_string()]);
        }
    }
    headers.insert(X_FORWARDED_PROTO.to_string(), vec![forwarded_proto.to_string()]);

    let mut query: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if let Some(raw) = parts.uri.query() {
        for (name, value) in form_urlencoded::parse(raw.as_bytes()) {
            query.entry(name.into_owned()).or_default().push(value.into_owned());
        }
    }

    let (body, is_base64_encoded) = match std::str::from_utf8(body) {
        Ok(text) => (text.to_string(), false),
        Err(_) => (STANDARD.encode(body), true),
    };

    let mut event = InboundEvent {
        http_method: parts.method.as_str().to_string(),
        path: parts.uri.path().to_string(),
        body,
        is_base64_encoded,
        ..Default::default()
    };
    match mode {
        HeaderMode::Single => {
            event.headers = Some(last_values(headers));
            event.query_string_parameters = Some(last_values(query));
        }
        HeaderMode::Multi => {
            event.multi_value_headers = Some(headers);
            event.multi_value_query_string_parameters = Some(query);
        }
    }
    event
}

/// Build the HTTP response the load balancer would send for this event.
pub fn response_from_event(event: &OutboundEvent) -> Result<Response<Bytes>, EmulationError> {
    let status =
        StatusCode::from_u16(event.status_code).map_err(|_| EmulationError::InvalidStatus(event.status_code))?;

    let mut response = Response::new(event.decoded_body()?);
    *response.status_mut() = status;
    for (name, value) in event.headers.pairs() {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| EmulationError::InvalidHeader(name.to_string()))?;
        let value = HeaderValue::from_bytes(value.as_bytes())
            .map_err(|_| EmulationError::InvalidHeader(name.to_string()))?;
        response.headers_mut().append(header, value);
    }
    Ok(response)
}

fn last_values(map: BTreeMap<String, Vec<String>>) -> BTreeMap<String, String> {
    map.into_iter()
        .filter_map(|(name, mut values)| values.pop().map(|value| (name, value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ResponseHeaders;
    use http::Request;

    fn parts(request: Request<()>) -> Parts {
        request.into_parts().0
    }

    #[test]
    fn test_single_mode_event() {
        let request = Request::builder()
            .method("POST")
            .uri("/search?q=rust&q=go&page=2")
            .header("Host", "svc.local")
            .header("X-Trace", "1")
            .header("X-Trace", "2")
            .body(())
            .unwrap();

        let event = event_from_request(&parts(request), b"hi", HeaderMode::Single, "https");
        let headers = event.headers.as_ref().unwrap();
        assert_eq!(headers["host"], "svc.local");
        assert_eq!(headers["x-trace"], "2");
        assert_eq!(headers["x-forwarded-proto"], "https");
        assert_eq!(event.query_string_parameters.as_ref().unwrap()["q"], "go");
        assert!(event.multi_value_headers.is_none());
        assert_eq!(event.body, "hi");
        assert!(!event.is_base64_encoded);
    }

    #[test]
    fn test_multi_mode_event() {
        let request = Request::builder()
            .uri("http://svc.local:8080/items?tag=a&tag=b")
            .body(())
            .unwrap();

        let event = event_from_request(&parts(request), &[0xff], HeaderMode::Multi, "http");
        let headers = event.multi_value_headers.as_ref().unwrap();
        assert_eq!(headers["host"], vec!["svc.local:8080"]);
        assert_eq!(event.multi_value_query_string_parameters.as_ref().unwrap()["tag"], vec!["a", "b"]);
        assert!(event.headers.is_none());
        assert_eq!(event.body, "/w==");
        assert!(event.is_base64_encoded);
    }

    #[test]
    fn test_response_from_event() {
        let mut headers = BTreeMap::new();
        headers.insert("Set-Cookie".to_string(), vec!["a=1".to_string(), "b=2".to_string()]);
        let event = OutboundEvent {
            status_code: 404,
            status_description: "404 Not Found".into(),
            headers: ResponseHeaders::Multi { multi_value_headers: headers },
            body: "bm9wZQ".into(),
            is_base64_encoded: true,
        };

        let response = response_from_event(&event).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers().get_all("set-cookie").iter().count(), 2);
        assert_eq!(response.body(), &Bytes::from_static(b"nope"));
    }

    #[test]
    fn test_bad_outbound_status() {
        let event = OutboundEvent {
            status_code: 42,
            status_description: String::new(),
            headers: ResponseHeaders::Single { headers: BTreeMap::new() },
            body: String::new(),
            is_base64_encoded: false,
        };
        assert!(matches!(response_from_event(&event), Err(EmulationError::InvalidStatus(42))));
    }
}

//! Built-in handler that describes the request it received.

use std::collections::BTreeMap;

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Request, StatusCode};
use serde::Serialize;

use crate::adapter::Handler;
use crate::event::RequestContext;
use crate::http::recorder::ResponseRecorder;

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Echo<'a> {
    method: &'a str,
    url: String,
    headers: BTreeMap<&'a str, Vec<String>>,
    body_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_group_arn: Option<&'a str>,
}

impl Handler for EchoHandler {
    fn serve(&self, request: Request<Bytes>, recorder: &mut ResponseRecorder) {
        let mut headers: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (name, value) in request.headers() {
            headers
                .entry(name.as_str())
                .or_default()
                .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
        }

        let echo = Echo {
            method: request.method().as_str(),
            url: request.uri().to_string(),
            headers,
            body_bytes: request.body().len(),
            target_group_arn: request
                .extensions()
                .get::<RequestContext>()
                .map(|context| context.elb.target_group_arn.as_str()),
        };

        match serde_json::to_vec(&echo) {
            Ok(body) => {
                recorder
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                recorder.write(&body);
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize echo body");
                recorder.set_status(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }
}

//! Response capture sink handed to handlers.

use std::io;

use bytes::{Bytes, BytesMut};
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};

/// Collects what a handler writes: status, headers and body.
///
/// Starts out as `200 OK` with no headers and an empty body.
#[derive(Debug, Default)]
pub struct ResponseRecorder {
    status: StatusCode,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Append to the body.
    pub fn write(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    /// Replace everything recorded so far with `response`.
    pub fn replace(&mut self, response: Response<Bytes>) {
        let (parts, body) = response.into_parts();
        self.status = parts.status;
        self.headers = parts.headers;
        self.body = BytesMut::from(body.as_ref());
    }

    /// Finish recording. A non-empty body without a `Content-Type` gets one
    /// sniffed from its contents.
    pub fn into_response(self) -> Response<Bytes> {
        let mut headers = self.headers;
        if !self.body.is_empty() && !headers.contains_key(CONTENT_TYPE) {
            let sniffed = if std::str::from_utf8(&self.body).is_ok() {
                "text/plain; charset=utf-8"
            } else {
                "application/octet-stream"
            };
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(sniffed));
        }

        let mut response = Response::new(self.body.freeze());
        *response.status_mut() = self.status;
        *response.headers_mut() = headers;
        response
    }
}

impl io::Write for ResponseRecorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        ResponseRecorder::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

//! Handler contract.

use bytes::Bytes;
use http::{Request, Response};

use crate::http::recorder::ResponseRecorder;

/// Synchronous request handler: reads a request, writes into a recorder.
pub trait Handler: Send + Sync {
    fn serve(&self, request: Request<Bytes>, recorder: &mut ResponseRecorder);
}

impl<F> Handler for F
where
    F: Fn(Request<Bytes>, &mut ResponseRecorder) + Send + Sync,
{
    fn serve(&self, request: Request<Bytes>, recorder: &mut ResponseRecorder) {
        self(request, recorder)
    }
}

/// Handler built from a closure that returns a whole response.
#[derive(Debug, Clone)]
pub struct FnHandler<F> {
    f: F,
}

/// Adapt `Fn(Request<Bytes>) -> Response<Bytes>` to [`Handler`].
pub fn handler_fn<F>(f: F) -> FnHandler<F>
where
    F: Fn(Request<Bytes>) -> Response<Bytes> + Send + Sync,
{
    FnHandler { f }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(Request<Bytes>) -> Response<Bytes> + Send + Sync,
{
    fn serve(&self, request: Request<Bytes>, recorder: &mut ResponseRecorder) {
        recorder.replace((self.f)(request));
    }
}

//! Translation between invocation events and generic HTTP messages.
//!
//! # Data Flow
//! ```text
//! InboundEvent
//!     → headers.rs (mode-selected fields → one HeaderMap)
//!     → url.rs (x-forwarded-proto + host + path + query → absolute URL)
//!     → body.rs (optional base64 → bytes)
//!     → request.rs (Request<Bytes>)
//!     → [handler writes into recorder.rs]
//!     → response.rs (Response<Bytes> → OutboundEvent)
//! ```
//!
//! # Design Decisions
//! - Generic messages are `http::Request<Bytes>` / `http::Response<Bytes>`
//! - Header mode is only consulted at the wire boundary
//! - Decode failures are typed, never swallowed

pub mod body;
pub mod error;
pub mod headers;
pub mod recorder;
pub mod request;
pub mod response;
pub mod url;

pub use error::DecodeError;
pub use headers::HeaderMode;
pub use recorder::ResponseRecorder;
pub use request::decode_request;
pub use response::{encode_response, status_description};

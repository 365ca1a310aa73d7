//! Handler adapter.
//!
//! # Data Flow
//! ```text
//! InboundEvent
//!     → http::decode_request
//!     → Handler::serve(request, &mut ResponseRecorder)
//!     → http::encode_response
//!     → OutboundEvent
//! ```
//!
//! # Design Decisions
//! - The adapter holds only the handler and an immutable `HeaderMode`, so
//!   one instance can serve concurrent invocations from many threads
//! - Decode failures never reach the handler

pub mod handler;
pub mod wrapper;

pub use handler::{handler_fn, FnHandler, Handler};
pub use wrapper::{decode_failure, Adapter};

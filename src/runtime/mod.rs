//! Local stand-in for the invocation transport.
//!
//! # Data Flow
//! ```text
//! POST /2015-03-31/functions/function/invocations (event JSON)
//!     → server.rs (parse event, spawn_blocking)
//!     → Adapter::handle
//!     → outbound event JSON
//!
//! any other request
//!     → emulator.rs (HTTP → InboundEvent, as the load balancer would)
//!     → Adapter::handle
//!     → emulator.rs (OutboundEvent → HTTP)
//! ```

pub mod echo;
pub mod emulator;
pub mod server;

pub use echo::EchoHandler;
pub use server::{InvokeServer, INVOKE_PATH, REQUEST_ID_HEADER};

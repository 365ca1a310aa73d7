//! Load balancer invocation bridge.
//!
//! Runs ordinary synchronous HTTP handlers behind a load balancer's
//! serverless invocation events.

pub mod adapter;
pub mod config;
pub mod event;
pub mod http;
pub mod observability;
pub mod runtime;

pub use crate::adapter::{handler_fn, Adapter, Handler};
pub use crate::config::schema::BridgeConfig;
pub use crate::event::{InboundEvent, OutboundEvent, ResponseHeaders};
pub use crate::http::{DecodeError, HeaderMode, ResponseRecorder};
pub use crate::runtime::InvokeServer;

//! Wire schema of the load balancer's invocation payloads.
//!
//! # Design Decisions
//! - Field names follow the load balancer's camelCase JSON
//! - Inbound events keep both header representations as optional fields;
//!   `HeaderMode` picks one when normalizing
//! - Outbound headers are a tagged choice, so exactly one representation
//!   is ever emitted

pub mod inbound;
pub mod outbound;

pub use inbound::{ElbContext, InboundEvent, RequestContext};
pub use outbound::{OutboundEvent, ResponseHeaders};

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BridgeConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BridgeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {value:?} is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("runtime.forwarded_proto: expected \"http\" or \"https\", got {0:?}")]
    UnsupportedProto(String),
}

pub fn validate_config(config: &BridgeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.runtime.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "runtime.bind_address",
            value: config.runtime.bind_address.clone(),
        });
    }
    if config.runtime.max_event_bytes == 0 {
        errors.push(ValidationError::Zero("runtime.max_event_bytes"));
    }
    if config.runtime.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("runtime.request_timeout_secs"));
    }
    if !matches!(config.runtime.forwarded_proto.as_str(), "http" | "https") {
        errors.push(ValidationError::UnsupportedProto(config.runtime.forwarded_proto.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

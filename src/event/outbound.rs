//! Outbound invocation response.

use std::collections::BTreeMap;

use bytes::Bytes;
use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::http::body::decode_body;
use crate::http::error::DecodeError;
use crate::http::headers::{self, HeaderMode};

/// Invocation result handed back to the load balancer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub status_code: u16,

    /// `"<code> <reason phrase>"`.
    pub status_description: String,

    #[serde(flatten)]
    pub headers: ResponseHeaders,

    pub body: String,

    pub is_base64_encoded: bool,
}

/// Response headers in exactly one wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseHeaders {
    Multi {
        #[serde(rename = "multiValueHeaders")]
        multi_value_headers: BTreeMap<String, Vec<String>>,
    },
    Single {
        headers: BTreeMap<String, String>,
    },
}

impl ResponseHeaders {
    /// Flatten a header map into the mode's representation. Single mode
    /// keeps only the first value of a repeated header.
    pub fn from_header_map(map: &HeaderMap, mode: HeaderMode) -> Self {
        match mode {
            HeaderMode::Single => ResponseHeaders::Single {
                headers: headers::first_values(map),
            },
            HeaderMode::Multi => ResponseHeaders::Multi {
                multi_value_headers: headers::all_values(map),
            },
        }
    }

    pub fn mode(&self) -> HeaderMode {
        match self {
            ResponseHeaders::Single { .. } => HeaderMode::Single,
            ResponseHeaders::Multi { .. } => HeaderMode::Multi,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ResponseHeaders::Single { headers } => headers.is_empty(),
            ResponseHeaders::Multi { multi_value_headers } => multi_value_headers.is_empty(),
        }
    }

    /// Every (name, value) pair, names in map order.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        match self {
            ResponseHeaders::Single { headers } => {
                headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
            }
            ResponseHeaders::Multi { multi_value_headers } => multi_value_headers
                .iter()
                .flat_map(|(k, vs)| vs.iter().map(move |v| (k.as_str(), v.as_str())))
                .collect(),
        }
    }
}

impl OutboundEvent {
    /// Body bytes, undoing the base64 transport when it was applied.
    pub fn decoded_body(&self) -> Result<Bytes, DecodeError> {
        decode_body(&self.body, self.is_base64_encoded)
    }
}

//! Inbound invocation event.

use std::collections::BTreeMap;

use http::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::http::error::DecodeError;
use crate::http::headers::{self, HeaderMode};
use crate::http::url::merge_query;

/// One HTTP request as delivered by the load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    pub http_method: String,

    pub path: String,

    /// Present when multi value headers are disabled on the target group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,

    /// Present when multi value headers are enabled on the target group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_headers: Option<BTreeMap<String, Vec<String>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_string_parameters: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_value_query_string_parameters: Option<BTreeMap<String, Vec<String>>>,

    /// Raw text, or base64 when `is_base64_encoded` is set.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,

    #[serde(default)]
    pub is_base64_encoded: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_context: Option<RequestContext>,
}

/// Invocation metadata attached by the load balancer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub elb: ElbContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElbContext {
    pub target_group_arn: String,
}

impl InboundEvent {
    /// Normalize the mode's header field into one case-insensitive map.
    ///
    /// A missing field yields an empty map.
    pub fn header_map(&self, mode: HeaderMode) -> Result<HeaderMap, DecodeError> {
        match mode {
            HeaderMode::Single => self
                .headers
                .as_ref()
                .map_or_else(|| Ok(HeaderMap::new()), headers::from_single),
            HeaderMode::Multi => self
                .multi_value_headers
                .as_ref()
                .map_or_else(|| Ok(HeaderMap::new()), headers::from_multi),
        }
    }

    /// Query parameters from both representations, multi-valued first.
    pub fn query_parameters(&self) -> BTreeMap<String, Vec<String>> {
        merge_query(
            self.multi_value_query_string_parameters.as_ref(),
            self.query_string_parameters.as_ref(),
        )
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

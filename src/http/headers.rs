//! Header mode selection and conversion between wire maps and `HeaderMap`.
//!
//! # Responsibilities
//! - Hold the single/multi header mode chosen at adapter construction
//! - Build a case-insensitive `HeaderMap` from either wire representation
//! - Flatten a `HeaderMap` back into either wire representation
//!
//! # Design Decisions
//! - Wire maps are `BTreeMap` so emitted JSON has a stable key order
//! - Emitted names use the canonical MIME form (`Content-Type`)

use std::collections::BTreeMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::http::error::DecodeError;

/// How headers and query parameters are carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    /// `headers` / `queryStringParameters`: one value per name.
    #[default]
    Single,
    /// `multiValueHeaders` / `multiValueQueryStringParameters`: ordered lists.
    Multi,
}

impl HeaderMode {
    /// Map the target group's "multi value headers" switch to a mode.
    pub fn from_multi_value(enabled: bool) -> Self {
        if enabled {
            HeaderMode::Multi
        } else {
            HeaderMode::Single
        }
    }

    pub fn is_multi(self) -> bool {
        self == HeaderMode::Multi
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderMode::Single => "single",
            HeaderMode::Multi => "multi",
        }
    }
}

/// Build a header map from single-valued wire headers.
///
/// Names differing only in case collapse onto one entry; the later key in
/// sort order wins.
pub fn from_single(fields: &BTreeMap<String, String>) -> Result<HeaderMap, DecodeError> {
    let mut headers = HeaderMap::with_capacity(fields.len());
    for (name, value) in fields {
        headers.insert(parse_name(name)?, parse_value(name, value)?);
    }
    Ok(headers)
}

/// Build a header map from multi-valued wire headers.
///
/// Each name's list replaces whatever an earlier, case-equivalent name put
/// there.
pub fn from_multi(fields: &BTreeMap<String, Vec<String>>) -> Result<HeaderMap, DecodeError> {
    let mut headers = HeaderMap::with_capacity(fields.len());
    for (name, values) in fields {
        let header = parse_name(name)?;
        headers.remove(&header);
        for value in values {
            headers.append(header.clone(), parse_value(name, value)?);
        }
    }
    Ok(headers)
}

/// First value of every header, keyed by canonical name.
pub fn first_values(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    for name in headers.keys() {
        if let Some(value) = headers.get(name) {
            fields.insert(canonical_name(name.as_str()), value_text(value));
        }
    }
    fields
}

/// Every value of every header in insertion order, keyed by canonical name.
pub fn all_values(headers: &HeaderMap) -> BTreeMap<String, Vec<String>> {
    let mut fields = BTreeMap::new();
    for name in headers.keys() {
        let values = headers.get_all(name).iter().map(value_text).collect();
        fields.insert(canonical_name(name.as_str()), values);
    }
    fields
}

/// Canonical MIME header form: first letter and every letter after a hyphen
/// upper case, everything else lower case.
pub fn canonical_name(name: &str) -> String {
    let mut canonical = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            canonical.push(c.to_ascii_uppercase());
        } else {
            canonical.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    canonical
}

fn parse_name(name: &str) -> Result<HeaderName, DecodeError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| DecodeError::InvalidHeader {
        name: name.to_string(),
    })
}

fn parse_value(name: &str, value: &str) -> Result<HeaderValue, DecodeError> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| DecodeError::InvalidHeader {
        name: name.to_string(),
    })
}

fn value_text(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

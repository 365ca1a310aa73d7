//! Absolute URL reconstruction from forwarded event fragments.
//!
//! # Responsibilities
//! - Merge multi-valued and single-valued query parameters
//! - Form-encode the merged query in sorted key order
//! - Assemble `scheme://host/path?query` and validate it
//!
//! # Design Decisions
//! - Multi-valued parameters come first; single-valued ones are appended
//! - An empty query emits no `?`
//! - The path is never normalized; the handler sees the path the client sent
//! - The host must be a bare authority (`name[:port]`, no userinfo)

use std::collections::BTreeMap;
use std::str::FromStr;

use ::url::form_urlencoded;
use http::uri::{Authority, Uri};

use crate::http::error::DecodeError;

/// Union of both query representations.
pub fn merge_query(
    multi: Option<&BTreeMap<String, Vec<String>>>,
    single: Option<&BTreeMap<String, String>>,
) -> BTreeMap<String, Vec<String>> {
    let mut query: BTreeMap<String, Vec<String>> = multi.cloned().unwrap_or_default();
    for (name, value) in single.into_iter().flatten() {
        query.entry(name.clone()).or_default().push(value.clone());
    }
    query
}

/// `application/x-www-form-urlencoded` serialization, keys sorted, repeated
/// values in their original order.
pub fn encode_query(query: &BTreeMap<String, Vec<String>>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, values) in query {
        for value in values {
            serializer.append_pair(name, value);
        }
    }
    serializer.finish()
}

/// Rebuild the URL the client originally requested.
///
/// The path is kept as sent: no dot-segment resolution and no separator
/// rewriting. Only bytes a URI cannot carry are percent-encoded.
pub fn reconstruct_url(
    proto: &str,
    host: &str,
    path: &str,
    query: &BTreeMap<String, Vec<String>>,
) -> Result<Uri, DecodeError> {
    let invalid = |reason: String| DecodeError::InvalidUrl {
        url: format!("{}://{}{}", proto, host, path),
        reason,
    };

    if proto.is_empty() {
        return Err(invalid("no scheme".to_string()));
    }
    let authority = parse_authority(host).map_err(invalid)?;

    let mut path_and_query = String::with_capacity(path.len() + 1);
    if !path.starts_with('/') {
        path_and_query.push('/');
    }
    escape_path(path, &mut path_and_query);

    let encoded = encode_query(query);
    if !encoded.is_empty() {
        path_and_query.push('?');
        path_and_query.push_str(&encoded);
    }

    Uri::builder()
        .scheme(proto)
        .authority(authority)
        .path_and_query(path_and_query)
        .build()
        .map_err(|e| invalid(e.to_string()))
}

fn parse_authority(host: &str) -> Result<Authority, String> {
    if host.is_empty() {
        return Err("no host".to_string());
    }
    if host.contains('@') {
        return Err("host carries userinfo".to_string());
    }
    Authority::from_str(host).map_err(|e| e.to_string())
}

/// Append `path`, percent-encoding every byte outside the set `http::Uri`
/// accepts in a path. `?` and `#` are always encoded so they stay in the path.
fn escape_path(path: &str, out: &mut String) {
    for &byte in path.as_bytes() {
        match byte {
            0x21 | 0x24..=0x3B | 0x3D | 0x40..=0x5F | 0x61..=0x7A | 0x7C | 0x7E => out.push(byte as char),
            _ => push_escaped(byte, out),
        }
    }
}

fn push_escaped(byte: u8, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    out.push('%');
    out.push(HEX[(byte >> 4) as usize] as char);
    out.push(HEX[(byte & 0x0F) as usize] as char);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi(pairs: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_repeated_values_keep_order() {
        let query = multi(&[("x", &["1", "2"])]);
        let url = reconstruct_url("https", "example.com", "/a/b", &query).unwrap();
        assert_eq!(url.to_string(), "https://example.com/a/b?x=1&x=2");
    }

    #[test]
    fn test_single_values_append_after_multi() {
        let m = multi(&[("a", &["1"])]);
        let mut s = BTreeMap::new();
        s.insert("a".to_string(), "2".to_string());
        s.insert("b".to_string(), "3".to_string());

        let merged = merge_query(Some(&m), Some(&s));
        assert_eq!(merged["a"], vec!["1", "2"]);
        assert_eq!(merged["b"], vec!["3"]);
        assert_eq!(encode_query(&merged), "a=1&a=2&b=3");
    }

    #[test]
    fn test_values_are_form_encoded() {
        let query = multi(&[("q", &["a b&c=d"])]);
        assert_eq!(encode_query(&query), "q=a+b%26c%3Dd");
    }

    #[test]
    fn test_empty_query_has_no_question_mark() {
        let url = reconstruct_url("http", "svc.local", "/ping", &BTreeMap::new()).unwrap();
        assert_eq!(url.to_string(), "http://svc.local/ping");
    }

    #[test]
    fn test_host_with_port() {
        let url = reconstruct_url("http", "svc.local:8080", "/", &BTreeMap::new()).unwrap();
        assert_eq!(url.port_u16(), Some(8080));
        assert_eq!(url.path(), "/");
    }

    #[test]
    fn test_empty_scheme_is_rejected() {
        let err = reconstruct_url("", "svc.local", "/", &BTreeMap::new()).unwrap_err();
        assert_eq!(err.kind(), "invalid_url");
    }

    #[test]
    fn test_path_question_mark_stays_in_path() {
        let url = reconstruct_url("http", "h", "/what?", &BTreeMap::new()).unwrap();
        assert_eq!(url.path(), "/what%3F");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_dot_segments_are_not_resolved() {
        for path in ["/a/../b", "/a/./b", "/a/%2e%2e/b", "/static/%2E/x"] {
            let url = reconstruct_url("http", "svc.local", path, &BTreeMap::new()).unwrap();
            assert_eq!(url.path(), path);
        }
    }

    #[test]
    fn test_backslash_is_kept() {
        let url = reconstruct_url("http", "svc.local", "/a\\b", &BTreeMap::new()).unwrap();
        assert_eq!(url.path(), "/a\\b");
    }

    #[test]
    fn test_unsafe_path_bytes_are_escaped() {
        let url = reconstruct_url("http", "svc.local", "/a b/caf\u{e9}<>", &BTreeMap::new()).unwrap();
        assert_eq!(url.path(), "/a%20b/caf%C3%A9%3C%3E");
    }

    #[test]
    fn test_missing_leading_slash_is_added() {
        let url = reconstruct_url("http", "svc.local", "ping", &BTreeMap::new()).unwrap();
        assert_eq!(url.path(), "/ping");
    }

    #[test]
    fn test_host_with_path_is_rejected() {
        let err = reconstruct_url("http", "svc.local/evil", "/x", &BTreeMap::new()).unwrap_err();
        assert_eq!(err.kind(), "invalid_url");
    }

    #[test]
    fn test_host_with_userinfo_is_rejected() {
        let err = reconstruct_url("http", "user@svc.local", "/x", &BTreeMap::new()).unwrap_err();
        assert_eq!(err.kind(), "invalid_url");
    }

    #[test]
    fn test_empty_host_is_rejected() {
        let err = reconstruct_url("http", "", "/x", &BTreeMap::new()).unwrap_err();
        assert_eq!(err.kind(), "invalid_url");
    }
}

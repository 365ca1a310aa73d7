//! Base64 body transport.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD_NO_PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use bytes::Bytes;

use crate::http::error::DecodeError;

/// Standard alphabet, accepting bodies with or without trailing padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Turn an event body into bytes, base64-decoding when the event says so.
pub fn decode_body(body: &str, is_base64: bool) -> Result<Bytes, DecodeError> {
    if is_base64 {
        Ok(Bytes::from(LENIENT.decode(body)?))
    } else {
        Ok(Bytes::copy_from_slice(body.as_bytes()))
    }
}

/// Outbound bodies are always unpadded standard base64.
pub fn encode_body(body: &[u8]) -> String {
    STANDARD_NO_PAD.encode(body)
}

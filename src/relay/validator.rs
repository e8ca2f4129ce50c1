//! Request validation: target allow-list and payload decoding.

use alloy::primitives::{hex, Address, Bytes};

use crate::relay::types::{RelayError, RelayRequest, RelayResult};

/// Check `request` against the allowed target and decode its payload.
///
/// Pure; never touches the network.
pub fn validate(request: &RelayRequest, allowed_target: Address) -> RelayResult<Bytes> {
    if request.target != allowed_target {
        return Err(RelayError::Validation(
            "target is not the allowed contract address".to_string(),
        ));
    }
    decode_call_data(&request.call_data)
}

/// Decode call data given as `0x`-prefixed hex or as a raw string.
///
/// Strings without the prefix are taken verbatim as UTF-8 bytes. A prefixed
/// string must be well-formed hex.
pub fn decode_call_data(input: &str) -> RelayResult<Bytes> {
    if input.is_empty() {
        return Err(RelayError::Validation("empty hex string".to_string()));
    }

    let digits = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(digits) => digits,
        None => return Ok(Bytes::copy_from_slice(input.as_bytes())),
    };

    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(RelayError::Validation(format!(
            "invalid hex string: unexpected character {:?}",
            bad
        )));
    }

    if digits.len() % 2 != 0 {
        return Err(RelayError::Validation("hex string of odd length".to_string()));
    }

    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| RelayError::Validation(format!("invalid hex string: {}", e)))
}

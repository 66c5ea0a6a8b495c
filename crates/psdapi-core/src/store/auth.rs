//! Cosmos DB master-key request authorization.
//!
//! Each REST request is signed with an HMAC-SHA256 over a small string built
//! from the verb, resource type, resource link and request date:
//!
//! ```text
//! StringToSign = lower(verb) + "\n"
//!              + lower(resourceType) + "\n"
//!              + resourceLink + "\n"
//!              + lower(x-ms-date) + "\n"
//!              + "" + "\n"
//! Signature    = base64(HMAC-SHA256(base64decode(masterKey), StringToSign))
//! Token        = urlencode("type=master&ver=1.0&sig=" + Signature)
//! ```

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::Sha256;

use crate::error::StoreError;

type HmacSha256 = Hmac<Sha256>;

/// Characters left as-is when URL-encoding the token.
const TOKEN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Decode a base64 master key into raw signing key bytes.
pub fn decode_master_key(key: &str) -> Result<Vec<u8>, StoreError> {
    STANDARD
        .decode(key.trim())
        .map_err(|e| StoreError::config(format!("COSMOS_DB_KEY is not valid base64: {e}")))
}

/// Format a timestamp the way `x-ms-date` expects (RFC 1123, GMT).
#[must_use]
pub fn format_request_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the string to sign for one request.
#[must_use]
pub fn build_string_to_sign(
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase(),
    )
}

/// Compute the base64 HMAC-SHA256 signature of `string_to_sign`.
#[must_use]
pub fn compute_signature(key: &[u8], string_to_sign: &str) -> String {
    STANDARD.encode(hmac_sha256(key, string_to_sign.as_bytes()))
}

/// Build the URL-encoded `authorization` header value.
#[must_use]
pub fn master_key_token(
    key: &[u8],
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> String {
    let string_to_sign = build_string_to_sign(verb, resource_type, resource_link, date);
    let signature = compute_signature(key, &string_to_sign);
    let token = format!("type=master&ver=1.0&sig={signature}");
    utf8_percent_encode(&token, TOKEN_ENCODE_SET).to_string()
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

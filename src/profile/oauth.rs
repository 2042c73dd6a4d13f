//! OAuth 1.0a request signing.
//!
//! Implements the HMAC-SHA1 signing scheme required by the Twitter API for
//! user-context requests:
//!
//! ```text
//! base = METHOD & enc(url) & enc(sorted "k=v" parameter string)
//! signature = base64(HMAC-SHA1(enc(consumer_secret) & enc(token_secret), base))
//! ```
//!
//! All escaping uses the strict RFC 3986 set: everything except
//! alphanumerics and `-._~` is percent-encoded.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

/// HMAC-SHA1 type alias
type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 escape set: encode everything except unreserved characters.
const OAUTH_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Credential material for signing one request.
#[derive(Debug, Clone, Copy)]
pub struct Token<'a> {
    /// Application (consumer) key
    pub consumer_key: &'a str,

    /// Application (consumer) secret
    pub consumer_secret: &'a str,

    /// User access token
    pub access_token: &'a str,

    /// User access token secret
    pub access_token_secret: &'a str,
}

/// Build a complete `Authorization: OAuth ...` header value.
///
/// `query` must contain every query parameter the request will carry; OAuth
/// signatures are bound to the full parameter set.
pub fn authorization_header(method: &str, base_url: &str, token: Token, query: &[(&str, &str)]) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    build_authorization_header(method, base_url, token, query, &nonce, timestamp)
}

/// Deterministic header construction; split out so tests can pin the
/// nonce and timestamp.
fn build_authorization_header(
    method: &str,
    base_url: &str,
    token: Token,
    query: &[(&str, &str)],
    nonce: &str,
    timestamp: u64,
) -> String {
    let timestamp = timestamp.to_string();

    let oauth_params: [(&str, &str); 6] = [
        ("oauth_consumer_key", token.consumer_key),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_timestamp", &timestamp),
        ("oauth_token", token.access_token),
        ("oauth_version", "1.0"),
    ];

    let mut all_params: Vec<(String, String)> = oauth_params
        .iter()
        .chain(query.iter())
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    all_params.sort();

    let base = signature_base_string(method, base_url, &all_params);
    let signature = sign(&base, token.consumer_secret, token.access_token_secret);

    let mut header_params: Vec<(String, String)> = oauth_params
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    header_params.push(("oauth_signature".to_string(), signature));
    header_params.sort();

    let fields: Vec<String> = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v)))
        .collect();

    format!("OAuth {}", fields.join(", "))
}

/// Construct the signature base string over the sorted parameter set.
fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (encode(k), encode(v)))
        .collect();
    encoded.sort();

    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        encode(base_url),
        encode(&param_string)
    )
}

/// Compute the base64-encoded HMAC-SHA1 signature for a base string.
fn sign(base: &str, consumer_secret: &str, token_secret: &str) -> String {
    let key = format!("{}&{}", encode(consumer_secret), encode(token_secret));

    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
    mac.update(base.as_bytes());

    BASE64.encode(mac.finalize().into_bytes())
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, OAUTH_ESCAPE).to_string()
}

// =============================================================================
// Tests
// =============================================================================

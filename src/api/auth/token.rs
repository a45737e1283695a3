//! Session token extraction and session cookie helpers.
//!
//! The auth library stores the session cookie as `<token>.<signature>`, where
//! the signature is the base64 HMAC-SHA256 of the token under the auth secret,
//! and percent-encodes the whole value. Only verified tokens reach the database.

use axum::http::{
    header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
    HeaderMap, HeaderValue,
};
use base64ct::{Base64, Encoding};
use hmac::{Hmac, Mac};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use super::AuthConfig;

type HmacSha256 = Hmac<Sha256>;

// Characters `encodeURIComponent` leaves as-is.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Read the verified session token from the request.
///
/// With the bearer plugin enabled, `Authorization: Bearer` is tried first. A
/// missing, empty or badly signed bearer token falls through to the cookie.
/// A cookie whose signature does not verify counts as no token.
#[must_use]
pub fn extract_session_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    if config.bearer_enabled() {
        if let Some(token) =
            extract_bearer_token(headers).and_then(|token| verify_bearer(&token, config.secret()))
        {
            return Some(token);
        }
    }

    let value = extract_cookie(headers, &config.session_cookie_name())?;
    verify_signed_value(&value, config.secret())
}

/// Sign `token` the way the auth library writes it into the session cookie.
#[must_use]
pub fn sign_session_token(token: &str, secret: &SecretString) -> String {
    let value = format!("{token}.{}", signature(token, secret));
    utf8_percent_encode(&value, URI_COMPONENT).to_string()
}

fn signature(token: &str, secret: &SecretString) -> String {
    match HmacSha256::new_from_slice(secret.expose_secret().as_bytes()) {
        Ok(mut mac) => {
            mac.update(token.as_bytes());
            Base64::encode_string(&mac.finalize().into_bytes())
        }
        Err(_) => String::new(),
    }
}

/// Percent-decode `value`, split off the signature and verify it.
fn verify_signed_value(value: &str, secret: &SecretString) -> Option<String> {
    let decoded = percent_decode_str(value).decode_utf8().ok()?;
    let (token, signature) = decoded.rsplit_once('.')?;
    if token.is_empty() {
        return None;
    }

    let signature = Base64::decode_vec(signature).ok()?;
    let mut mac = HmacSha256::new_from_slice(secret.expose_secret().as_bytes()).ok()?;
    mac.update(token.as_bytes());
    // verify_slice compares in constant time
    mac.verify_slice(&signature).ok()?;

    Some(token.to_string())
}

// Bearer tokens may be raw session tokens or signed like the cookie.
fn verify_bearer(token: &str, secret: &SecretString) -> Option<String> {
    let decoded = percent_decode_str(token).decode_utf8().ok()?;
    if decoded.contains('.') {
        verify_signed_value(token, secret)
    } else {
        Some(decoded.into_owned())
    }
}

fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(value) = header.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            let (Some(key), Some(val)) = (parts.next(), parts.next()) else {
                continue;
            };
            let val = val.trim();
            if key.trim() == cookie_name && !val.is_empty() {
                return Some(val.to_string());
            }
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// `Set-Cookie` value that expires the session cookie.
///
/// # Errors
/// Returns an error if the configured cookie prefix is not a valid header value.
pub fn clear_session_cookie(config: &AuthConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        config.session_cookie_name()
    );
    if config.secure_cookies() {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

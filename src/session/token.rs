//! Client-side bearer token checks
//!
//! Nothing here verifies a signature; the server stays the authority. These
//! checks only decide whether a stored token is worth presenting at all.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

use crate::error::ApiError;

/// Placeholder stored by the old OAuth hand-off before the backend exchange.
pub const OAUTH_PLACEHOLDER_TOKEN: &str = "google-oauth-token";

/// Claims the client reads from a token payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenClaims {
    /// Expiry, Unix seconds
    pub exp: Option<i64>,
    /// Role claim as issued
    pub role: Option<String>,
    /// Numeric user id claim
    pub user_id: Option<u64>,
}

/// Decode base64url (URL-safe base64 without padding). Standard-alphabet and
/// padded input are accepted too.
fn decode_segment(input: &str) -> Result<Vec<u8>, String> {
    let normalized = input.trim_end_matches('=').replace('+', "-").replace('/', "_");

    general_purpose::URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| e.to_string())
}

/// Split a token and JSON-parse its payload segment.
fn decode_payload(token: &str) -> Result<Value, ApiError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ApiError::InvalidToken);
    }

    let bytes = decode_segment(parts[1]).map_err(|e| {
        log::debug!("Token payload is not base64: {}", e);
        ApiError::InvalidToken
    })?;

    serde_json::from_slice(&bytes).map_err(|e| {
        log::debug!("Token payload is not JSON: {}", e);
        ApiError::InvalidToken
    })
}

/// Read the claims the client cares about.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let payload = decode_payload(token)?;

    Ok(TokenClaims {
        exp: payload.get("exp").and_then(numeric_claim),
        role: payload
            .get("role")
            .and_then(Value::as_str)
            .map(str::to_string),
        user_id: payload.get("user_id").and_then(Value::as_u64),
    })
}

fn numeric_claim(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.floor() as i64))
}

/// Check the token against the current clock.
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, Utc::now().timestamp())
}

/// Check the token against `now` (Unix seconds).
///
/// Rejects the empty string, the OAuth placeholder, anything without exactly
/// three segments, a payload that does not decode to JSON, and an `exp` at or
/// before `now`. A payload without `exp` is accepted.
pub fn is_valid_at(token: &str, now: i64) -> bool {
    if token.is_empty() || token == OAUTH_PLACEHOLDER_TOKEN {
        return false;
    }

    let payload = match decode_payload(token) {
        Ok(payload) => payload,
        Err(_) => return false,
    };

    match payload.get("exp") {
        None => true,
        Some(exp) => match numeric_claim(exp) {
            Some(exp) if exp > now => true,
            Some(_) => {
                log::debug!("Token has expired");
                false
            }
            None => false,
        },
    }
}

/// Expiry time, when the token carries a readable `exp`.
pub fn expiration(token: &str) -> Option<DateTime<Utc>> {
    decode_claims(token)
        .ok()?
        .exp
        .and_then(|exp| DateTime::from_timestamp(exp, 0))
}

/// True when fewer than `within` remain before expiry, or the expiry is unreadable.
pub fn will_expire_soon(token: &str, within: Duration) -> bool {
    match expiration(token) {
        None => true,
        Some(expires_at) => expires_at - Utc::now() < within,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an unsigned token around `payload`.
    pub(crate) fn make_token(payload: &Value) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.signature", header, body)
    }

    #[test]
    fn test_rejects_wrong_segment_count() {
        let now = 1_700_000_000;
        for token in ["", "abc", "a.b", "a.b.c.d", "....", "a..b.c"] {
            assert!(!is_valid_at(token, now), "accepted {:?}", token);
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now().timestamp();

        let expired = make_token(&serde_json::json!({ "exp": now - 1 }));
        assert!(!is_valid_at(&expired, now));

        let at_now = make_token(&serde_json::json!({ "exp": now }));
        assert!(!is_valid_at(&at_now, now));

        let fresh = make_token(&serde_json::json!({ "exp": now + 3600 }));
        assert!(is_valid_at(&fresh, now));
        assert!(is_valid(&fresh));
    }

    #[test]
    fn test_placeholder_always_rejected() {
        assert!(!is_valid(OAUTH_PLACEHOLDER_TOKEN));
        assert!(!is_valid_at(OAUTH_PLACEHOLDER_TOKEN, 0));
    }

    #[test]
    fn test_payload_must_be_json() {
        let body = general_purpose::URL_SAFE_NO_PAD.encode("not json");
        let token = format!("h.{}.s", body);
        assert!(!is_valid_at(&token, 0));

        // Not base64 at all
        assert!(!is_valid_at("h.!!!.s", 0));
    }

    #[test]
    fn test_missing_exp_is_accepted() {
        let token = make_token(&serde_json::json!({ "user_id": 7, "role": "student" }));
        assert!(is_valid_at(&token, i64::MAX));
    }

    #[test]
    fn test_non_numeric_exp_is_rejected() {
        let token = make_token(&serde_json::json!({ "exp": "tomorrow" }));
        assert!(!is_valid_at(&token, 0));
    }

    #[test]
    fn test_padded_standard_alphabet_payload() {
        let body = general_purpose::STANDARD.encode(r#"{"exp":4102444800,"sub":"??>"}"#);
        let token = format!("h.{}.s", body);
        assert!(is_valid_at(&token, 1_700_000_000));
    }

    #[test]
    fn test_decode_claims() {
        let token = make_token(&serde_json::json!({
            "exp": 4_102_444_800_i64,
            "role": "company",
            "user_id": 42
        }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, Some(4_102_444_800));
        assert_eq!(claims.role.as_deref(), Some("company"));
        assert_eq!(claims.user_id, Some(42));

        assert_eq!(decode_claims("nope"), Err(ApiError::InvalidToken));
    }

    #[test]
    fn test_expiration_and_expire_soon() {
        let soon = make_token(&serde_json::json!({
            "exp": (Utc::now() + Duration::minutes(10)).timestamp()
        }));
        assert!(expiration(&soon).is_some());
        assert!(will_expire_soon(&soon, Duration::hours(1)));
        assert!(!will_expire_soon(&soon, Duration::minutes(5)));

        let no_exp = make_token(&serde_json::json!({ "role": "guide" }));
        assert!(expiration(&no_exp).is_none());
        assert!(will_expire_soon(&no_exp, Duration::hours(1)));
    }
}

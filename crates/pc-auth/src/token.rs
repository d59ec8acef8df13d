use base64::Engine as _;

use crate::error::AuthError;

/// Decode the `exp` claim of an access token without verifying its signature.
///
/// The backend signs its tokens with a secret the client never sees, so this
/// is only good for display and for skipping obviously dead tokens.
///
/// # Errors
///
/// Returns `AuthError::Other` if the token is not a three-part JWT or the
/// `exp` claim is missing or unparseable.
pub fn decode_expiry(jwt: &str) -> Result<chrono::DateTime<chrono::Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Other("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::Other(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Other(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Other("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Other("invalid exp timestamp".into()))
}

/// `true` when the token's `exp` is known and falls within `buffer_secs` of now.
///
/// Tokens whose expiry cannot be decoded are not considered expired; the
/// server has the final word.
#[must_use]
pub fn is_near_expiry(jwt: &str, buffer_secs: i64) -> bool {
    decode_expiry(jwt).is_ok_and(|exp| {
        exp <= chrono::Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
    })
}

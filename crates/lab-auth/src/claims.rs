use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::AuthError;

const NAME_IDENTIFIER_CLAIM: &str =
    "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";
const NAME_CLAIM: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Claims read from the bearer token. The signature is NOT verified.
#[derive(Debug, Clone)]
pub struct LabClaims {
    /// Raw JWT string, sent as the bearer credential.
    pub raw_jwt: String,
    pub user_id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    /// `None` when the token carries no `exp` claim.
    pub expires_at: Option<DateTime<Utc>>,
}

impl LabClaims {
    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            expires_at <= Utc::now() + chrono::TimeDelta::seconds(buffer_secs)
        })
    }
}

/// Decode the payload segment of `jwt`.
///
/// The user id is taken from `sub`, `nameid`, or the long-form
/// name-identifier claim, in that order.
///
/// # Errors
///
/// Returns [`AuthError::InvalidToken`] if the JWT is malformed or carries
/// no user id.
pub fn decode(jwt: &str) -> Result<LabClaims, AuthError> {
    let jwt = jwt.trim();
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;
    let value: Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;

    let user_id = first_string(&value, &["sub", "nameid", NAME_IDENTIFIER_CLAIM])
        .ok_or_else(|| AuthError::InvalidToken("missing user id claim".into()))?;
    let expires_at = match value.get("exp") {
        None | Some(Value::Null) => None,
        Some(exp) => {
            let secs = exp
                .as_i64()
                .ok_or_else(|| AuthError::InvalidToken("exp claim is not a number".into()))?;
            Some(
                DateTime::from_timestamp(secs, 0)
                    .ok_or_else(|| AuthError::InvalidToken("invalid exp timestamp".into()))?,
            )
        }
    };

    Ok(LabClaims {
        raw_jwt: jwt.to_string(),
        user_id,
        name: first_string(&value, &["name", "unique_name", NAME_CLAIM]),
        role: first_string(&value, &["role", ROLE_CLAIM]),
        expires_at,
    })
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| value.get(*key))
        .find_map(|claim| match claim {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        })
}

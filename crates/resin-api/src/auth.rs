// Session token holder.
//
// The token is owned and replaced by whoever manages the login flow; the
// transport reads it on every request and the session context decodes the
// user identity out of it. Nothing here caches derived values.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::Error;

/// Identity claims carried in the payload segment of a session JWT.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Swappable holder for the current session token.
///
/// Cheap to read from any task. Replacing the token takes effect on the
/// next request.
pub struct TokenStore {
    token: ArcSwapOption<SecretString>,
}

impl TokenStore {
    /// An empty store; requests go out unauthenticated until a token is set.
    pub fn new() -> Self {
        Self {
            token: ArcSwapOption::from(None),
        }
    }

    pub fn with_token(token: SecretString) -> Self {
        let store = Self::new();
        store.set(token);
        store
    }

    /// Replace the current token.
    pub fn set(&self, token: SecretString) {
        self.token.store(Some(Arc::new(token)));
    }

    /// Forget the current token.
    pub fn clear(&self) {
        self.token.store(None);
    }

    pub fn is_set(&self) -> bool {
        self.token.load().is_some()
    }

    /// `Authorization` header value for the current token, marked sensitive.
    pub(crate) fn authorization(&self) -> Option<HeaderValue> {
        let guard = self.token.load();
        let token = guard.as_ref()?;
        let mut value =
            HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())).ok()?;
        value.set_sensitive(true);
        Some(value)
    }

    /// Decode the claims from the current token's payload segment.
    ///
    /// The signature is not verified; the API does that on every request.
    pub fn claims(&self) -> Result<TokenClaims, Error> {
        let guard = self.token.load();
        let token = guard.as_ref().ok_or_else(|| Error::Authentication {
            message: "no session token set".into(),
        })?;
        decode_claims(token.expose_secret())
    }

    /// The authenticated user's id.
    pub fn user_id(&self) -> Result<u64, Error> {
        self.claims().map(|claims| claims.id)
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("is_set", &self.is_set())
            .finish()
    }
}

fn decode_claims(token: &str) -> Result<TokenClaims, Error> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::InvalidToken("expected three dot-separated segments".into()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::InvalidToken(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::InvalidToken(format!("payload is not a claims object: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn token_for(payload: &str) -> SecretString {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        SecretString::from(format!("{header}.{body}.signature"))
    }

    #[test]
    fn decodes_user_id_from_payload() {
        let store = TokenStore::with_token(token_for(
            r#"{"id":1344,"username":"jviotti","email":"juan@example.com"}"#,
        ));
        let claims = store.claims().unwrap();
        assert_eq!(claims.id, 1344);
        assert_eq!(claims.username.as_deref(), Some("jviotti"));
        assert_eq!(store.user_id().unwrap(), 1344);
    }

    #[test]
    fn missing_token_is_an_auth_error() {
        let store = TokenStore::new();
        assert!(matches!(store.user_id(), Err(Error::Authentication { .. })));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let store = TokenStore::with_token(SecretString::from("not-a-jwt".to_string()));
        assert!(matches!(store.claims(), Err(Error::InvalidToken(_))));
    }

    #[test]
    fn padded_payload_is_accepted() {
        let header = URL_SAFE_NO_PAD.encode(b"{}");
        let body = format!("{}==", URL_SAFE_NO_PAD.encode(br#"{"id":7}"#));
        let store = TokenStore::with_token(SecretString::from(format!("{header}.{body}.sig")));
        assert_eq!(store.user_id().unwrap(), 7);
    }

    #[test]
    fn clear_drops_authorization_header() {
        let store = TokenStore::with_token(token_for(r#"{"id":1}"#));
        assert!(store.authorization().is_some());
        store.clear();
        assert!(store.authorization().is_none());
        assert!(!store.is_set());
    }
}

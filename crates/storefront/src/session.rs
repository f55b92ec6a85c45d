//! Cookie-based session verification and issuance.
//!
//! The session is a signed HS256 token held by the client in an HTTP-only
//! cookie. It is decoded and verified per request; nothing is stored server
//! side. Any verification failure — missing cookie, malformed token, bad
//! signature, expiry — collapses to "no session". A forged or expired token
//! is logged and treated exactly like an anonymous request, never surfaced
//! as an error to the caller.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::types::AuthenticatedUser;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "velora_session";

/// Session lifetime for newly issued tokens (7 days).
const SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Errors that can occur when issuing a session token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token encoding failed: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried inside the session token.
///
/// Optional claims are omitted from the encoded token when absent, and map
/// to explicit `Option` fields on [`SessionUser`] — field presence is part
/// of the contract, not an accident of serialization.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// User ID.
    sub: String,
    /// User email address.
    email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    permissions: Option<Vec<String>>,
    /// Expiry as a Unix timestamp.
    exp: i64,
}

/// The verified identity derived from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub permissions: Option<Vec<String>>,
}

/// A verified, non-expired session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: SessionUser,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session's role claim equals `role` exactly.
    ///
    /// A session without a role claim has no role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.user.role.as_deref() == Some(role)
    }

    /// Whether the session's permission list contains `permission`.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.user
            .permissions
            .as_ref()
            .is_some_and(|perms| perms.iter().any(|p| p == permission))
    }

    /// Display name for the user menu: the name claim when present,
    /// otherwise the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.name.as_deref().unwrap_or(&self.user.email)
    }
}

/// Verifies and issues session tokens with a server-held secret.
#[derive(Clone)]
pub struct SessionVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    /// Create a verifier from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(bytes),
            decoding_key: DecodingKey::from_secret(bytes),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Verify a session token from the cookie.
    ///
    /// Returns `None` for any invalid token: bad signature, malformed
    /// structure, wrong algorithm, or expired claims. Failures are logged
    /// server side only.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<Session> {
        let data = match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(err) => {
                match err.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("session token expired");
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("session token has an invalid signature");
                    }
                    other => {
                        tracing::debug!(error = ?other, "session token rejected");
                    }
                }
                return None;
            }
        };

        let claims = data.claims;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)?;

        Some(Session {
            user: SessionUser {
                id: claims.sub,
                email: claims.email,
                name: claims.name,
                role: claims.role,
                permissions: claims.permissions,
            },
            expires_at,
        })
    }

    /// Issue a fresh session token for a user authenticated upstream.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if token encoding fails.
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<String, SessionError> {
        let expires_at = Utc::now() + Duration::seconds(SESSION_TTL_SECONDS);
        let claims = SessionClaims {
            sub: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.clone(),
            permissions: user.permissions.clone(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn verifier(secret: &str) -> SessionVerifier {
        SessionVerifier::new(&SecretString::from(secret.to_string()))
    }

    fn sign(secret: &str, claims: &SessionClaims) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_expiring_in(seconds: i64) -> SessionClaims {
        SessionClaims {
            sub: "user-1".to_string(),
            email: "ana@example.com".to_string(),
            name: None,
            role: None,
            permissions: None,
            exp: (Utc::now() + Duration::seconds(seconds)).timestamp(),
        }
    }

    const SECRET: &str = "k9f2Lx7Qw1Zr8Tb3Nv6Mj4Hs0Pd5Gc2a";

    #[test]
    fn test_valid_token_produces_session() {
        let token = sign(SECRET, &claims_expiring_in(3600));
        let session = verifier(SECRET).verify(&token).unwrap();

        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.user.email, "ana@example.com");
        assert_eq!(session.user.name, None);
        assert_eq!(session.user.role, None);
        assert_eq!(session.user.permissions, None);
    }

    #[test]
    fn test_optional_claims_present_only_when_in_token() {
        let mut claims = claims_expiring_in(3600);
        claims.name = Some("Ana".to_string());
        claims.role = Some("admin".to_string());
        claims.permissions = Some(vec!["orders:read".to_string()]);

        let token = sign(SECRET, &claims);
        let session = verifier(SECRET).verify(&token).unwrap();

        assert_eq!(session.user.name.as_deref(), Some("Ana"));
        assert_eq!(session.user.role.as_deref(), Some("admin"));
        assert!(session.has_permission("orders:read"));
        assert!(!session.has_permission("orders:write"));
    }

    #[test]
    fn test_malformed_token_is_rejected() {
        assert!(verifier(SECRET).verify("not-a-token").is_none());
        assert!(verifier(SECRET).verify("").is_none());
        assert!(verifier(SECRET).verify("a.b.c").is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Two hours past expiry, well beyond validation leeway
        let token = sign(SECRET, &claims_expiring_in(-7200));
        assert!(verifier(SECRET).verify(&token).is_none());
    }

    #[test]
    fn test_token_signed_with_different_secret_is_rejected() {
        let token = sign("Qw8Zr2Tb6Nv0Mj4Hs8Pd2Gc6aK0f4Lx9", &claims_expiring_in(3600));
        assert!(verifier(SECRET).verify(&token).is_none());
    }

    #[test]
    fn test_has_role_exact_match_only() {
        let mut claims = claims_expiring_in(3600);
        claims.role = Some("admin".to_string());
        let session = verifier(SECRET)
            .verify(&sign(SECRET, &claims))
            .unwrap();

        assert!(session.has_role("admin"));
        assert!(!session.has_role("Admin"));
        assert!(!session.has_role("administrator"));
    }

    #[test]
    fn test_has_role_false_without_role_claim() {
        let token = sign(SECRET, &claims_expiring_in(3600));
        let session = verifier(SECRET).verify(&token).unwrap();
        assert!(!session.has_role("admin"));
    }

    #[test]
    fn test_issue_then_verify_round_trip() {
        let v = verifier(SECRET);
        let user = AuthenticatedUser {
            id: "user-9".to_string(),
            email: "leo@example.com".to_string(),
            name: Some("Leo".to_string()),
            role: None,
            permissions: None,
        };

        let token = v.issue(&user).unwrap();
        let session = v.verify(&token).unwrap();

        assert_eq!(session.user.id, "user-9");
        assert_eq!(session.user.name.as_deref(), Some("Leo"));
        assert_eq!(session.user.role, None);
        assert!(session.expires_at > Utc::now());
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let token = sign(SECRET, &claims_expiring_in(3600));
        let session = verifier(SECRET).verify(&token).unwrap();
        assert_eq!(session.display_name(), "ana@example.com");
    }
}

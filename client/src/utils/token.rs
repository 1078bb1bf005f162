//! Bearer-token decoding for session state.
//!
//! The client decodes the token payload blindly, without verifying the
//! signature. That is deliberate: authorization is enforced server-side on
//! every authenticated call, and the decoded claims only drive UX routing.
//! Nothing in this module is a security boundary.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use crate::auth::models::{AccountStatus, Identity, Role};
use crate::errors::{ClientError, ClientResult};

/// Claims carried in the token payload.
///
/// Every field is optional: a syntactically valid but semantically empty
/// payload still decodes, and downstream consumers handle the gaps (a missing
/// role means no role-gated access).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID; some token issuers use `id` instead of `sub`.
    #[serde(default, alias = "id")]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Token expiration timestamp (epoch seconds)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Token issued at timestamp
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Decode the claims from a compact three-segment token.
///
/// Fails with `ClientError::Decode` on any malformed input; never panics.
pub fn decode_claims(token: &str) -> ClientResult<Claims> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(ClientError::decode(format!(
            "expected 3 token segments, got {}",
            segments.len()
        )));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1])
        .map_err(|e| ClientError::decode(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&payload)
        .map_err(|e| ClientError::decode(format!("payload is not valid claims JSON: {e}")))
}

/// Decode a bearer token into an `Identity`.
pub fn decode_identity(token: &str) -> ClientResult<Identity> {
    let claims = decode_claims(token)?;

    Ok(Identity {
        id: claims.sub.unwrap_or_default(),
        email: claims.email,
        name: claims.name,
        role: claims.role.as_deref().and_then(Role::parse),
        status: AccountStatus::parse(claims.status.as_deref()),
        expires_at: claims.exp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn mint(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_well_formed_token() {
        let token = mint(json!({
            "sub": "user-1",
            "email": "pat@example.com",
            "name": "Pat",
            "role": "SHELTER",
            "status": "ACTIVE",
            "exp": 4_102_444_800i64,
        }));

        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.id, "user-1");
        assert_eq!(identity.email.as_deref(), Some("pat@example.com"));
        assert_eq!(identity.role, Some(Role::Shelter));
        assert_eq!(identity.status, AccountStatus::Active);
        assert_eq!(identity.expires_at, Some(4_102_444_800));
        assert!(!identity.is_expired());
    }

    #[test]
    fn test_decode_tolerates_id_alias_and_lowercase_role() {
        let token = mint(json!({"id": "u-9", "role": "admin"}));
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.id, "u-9");
        assert_eq!(identity.role, Some(Role::Admin));
    }

    #[test]
    fn test_missing_role_decodes_to_none() {
        let token = mint(json!({"sub": "u-2", "exp": 4_102_444_800i64}));
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.role, None);
        assert_eq!(identity.status, AccountStatus::Active);
    }

    #[test]
    fn test_unknown_role_decodes_to_none() {
        let token = mint(json!({"sub": "u-3", "role": "WIZARD"}));
        assert_eq!(decode_identity(&token).unwrap().role, None);
    }

    #[test]
    fn test_malformed_tokens_fail_without_panicking() {
        let malformed = [
            "",
            "not-a-token",
            "one.two",
            "a.b.c.d",
            "head.!!!not-base64!!!.sig",
        ];
        for token in malformed {
            assert!(decode_identity(token).is_err(), "accepted: {token:?}");
        }

        // Valid base64url but not JSON.
        let garbage = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
        assert!(decode_identity(&garbage).is_err());
    }

    #[test]
    fn test_expired_claim_detected() {
        let token = mint(json!({"sub": "u-4", "role": "ADOPTER", "exp": 1_000_000i64}));
        let identity = decode_identity(&token).unwrap();
        assert!(identity.is_expired());
    }

    #[test]
    fn test_missing_exp_never_expires_client_side() {
        let token = mint(json!({"sub": "u-5", "role": "ADOPTER"}));
        assert!(!decode_identity(&token).unwrap().is_expired());
    }
}

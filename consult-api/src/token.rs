/*
 * Copyright 2025 Telecare Contributors
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Credential signing backends.
//!
//! One logical operation — `sign(claims, key)` — with three interchangeable
//! encodings selected at deployment time. Claim building draws the nonce;
//! signing itself is a pure function of (claims, secret): no network call,
//! no additional randomness.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use std::fmt;
use telecare_consult_types::claims::{
    CompactClaims, DirectJoinClaims, ManagementClaims, RoomAccessClaims, CLAIMS_VERSION,
};
use telecare_consult_types::{compact, Provisioning, Role};
use uuid::Uuid;

use crate::error::AppError;
use crate::expiry::{TokenWindow, DIRECT_JOIN_TTL_SECS};

/// Provider signing key, loaded once at startup and passed by reference into
/// every signing call. Never logged, never sent to a client.
#[derive(Clone)]
pub struct SigningKey {
    pub access_key: String,
    secret: String,
}

impl SigningKey {
    pub fn new(access_key: String, secret: String) -> Self {
        Self { access_key, secret }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("access_key", &self.access_key)
            .field("secret", &"***")
            .finish()
    }
}

/// The credential encoding used by this deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigningBackend {
    /// HS256 JWTs for both the management credential and per-party room
    /// access credentials; rooms are registered remotely.
    ManagementJwt,
    /// HS256 JWT over `{app_id, channel, uid, role, exp}`; locally named
    /// rooms, fixed 1 h TTL.
    DirectJwt,
    /// Compact binary HMAC envelope (see [`telecare_consult_types::compact`]).
    CompactHmac,
}

impl SigningBackend {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "management-jwt" => Ok(Self::ManagementJwt),
            "direct-jwt" => Ok(Self::DirectJwt),
            "compact" => Ok(Self::CompactHmac),
            other => Err(format!(
                "PROVIDER_SCHEME must be one of management-jwt, direct-jwt, compact (got '{other}')"
            )),
        }
    }

    /// The room provisioning strategy paired with this encoding.
    pub fn provisioning(&self) -> Provisioning {
        match self {
            Self::ManagementJwt => Provisioning::RemoteProvisioned,
            Self::DirectJwt | Self::CompactHmac => Provisioning::LocallyGenerated,
        }
    }

    /// Access-credential TTL for this encoding. The direct-JWT TTL is fixed;
    /// the others take the deployment-configured value.
    pub fn access_ttl_secs(&self, configured: i64) -> i64 {
        match self {
            Self::DirectJwt => DIRECT_JOIN_TTL_SECS,
            Self::ManagementJwt | Self::CompactHmac => configured,
        }
    }

    /// Build claims with a fresh nonce and sign a joining credential for
    /// `subject_id` in `room_id`.
    pub fn sign_access(
        &self,
        key: &SigningKey,
        window: TokenWindow,
        room_id: &str,
        subject_id: &str,
        role: Role,
    ) -> Result<String, AppError> {
        match self {
            Self::ManagementJwt => {
                let claims = build_room_access_claims(key, window, room_id, subject_id, role);
                sign_jwt(&claims, key.secret())
            }
            Self::DirectJwt => {
                let claims = DirectJoinClaims {
                    app_id: key.access_key.clone(),
                    channel: room_id.to_string(),
                    uid: subject_id.to_string(),
                    role,
                    exp: window.expires_at,
                };
                sign_jwt(&claims, key.secret())
            }
            Self::CompactHmac => {
                let claims = build_compact_claims(key, window, subject_id);
                compact::encode(&claims, key.secret()).map_err(|e| {
                    tracing::error!("Failed to encode compact credential: {e}");
                    AppError::internal("failed to generate joining credential")
                })
            }
        }
    }
}

/// Build the claims of a management credential with a fresh `jti`.
pub fn build_management_claims(key: &SigningKey, window: TokenWindow) -> ManagementClaims {
    ManagementClaims {
        access_key: key.access_key.clone(),
        token_type: ManagementClaims::TOKEN_TYPE.to_string(),
        version: CLAIMS_VERSION,
        jti: Uuid::new_v4().to_string(),
        iat: window.issued_at,
        nbf: window.not_before,
        exp: window.expires_at,
    }
}

fn build_room_access_claims(
    key: &SigningKey,
    window: TokenWindow,
    room_id: &str,
    subject_id: &str,
    role: Role,
) -> RoomAccessClaims {
    RoomAccessClaims {
        access_key: key.access_key.clone(),
        room_id: room_id.to_string(),
        user_id: subject_id.to_string(),
        role,
        token_type: RoomAccessClaims::TOKEN_TYPE.to_string(),
        version: CLAIMS_VERSION,
        jti: Uuid::new_v4().to_string(),
        iat: window.issued_at,
        nbf: window.not_before,
        exp: window.expires_at,
    }
}

fn build_compact_claims(key: &SigningKey, window: TokenWindow, subject_id: &str) -> CompactClaims {
    CompactClaims {
        app_id: key.access_key.clone(),
        user_id: subject_id.to_string(),
        nonce: rand::thread_rng().gen::<u32>(),
        ctime: window.issued_at,
        expire: window.expires_at,
    }
}

/// Sign any serializable claim set as an HS256 JWT.
pub fn sign_jwt<C: serde::Serialize>(claims: &C, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to sign JWT: {e}");
        AppError::internal("failed to generate credential")
    })
}

/// Validation with zero skew tolerance; `iat`/`nbf`-bearing claim sets also
/// enforce not-before.
fn strict_validation(check_nbf: bool) -> Validation {
    let mut validation = Validation::default();
    validation.leeway = 0;
    validation.validate_nbf = check_nbf;
    validation
}

/// Decode and verify a management credential.
pub fn decode_management(
    token: &str,
    secret: &str,
) -> Result<ManagementClaims, jsonwebtoken::errors::Error> {
    decode::<ManagementClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &strict_validation(true),
    )
    .map(|data| data.claims)
}

/// Decode and verify a room access credential.
pub fn decode_room_access(
    token: &str,
    secret: &str,
) -> Result<RoomAccessClaims, jsonwebtoken::errors::Error> {
    decode::<RoomAccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &strict_validation(true),
    )
    .map(|data| data.claims)
}

/// Decode and verify a direct-join credential.
pub fn decode_direct_join(
    token: &str,
    secret: &str,
) -> Result<DirectJoinClaims, jsonwebtoken::errors::Error> {
    decode::<DirectJoinClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &strict_validation(false),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::{stamp, DEFAULT_ACCESS_TTL_SECS};
    use chrono::Utc;

    const TEST_SECRET: &str = "super-secret-test-key";

    fn test_key() -> SigningKey {
        SigningKey::new("access-key-1".to_string(), TEST_SECRET.to_string())
    }

    #[test]
    fn room_access_token_round_trips_with_correct_claims() {
        let key = test_key();
        let window = stamp(Utc::now().timestamp(), DEFAULT_ACCESS_TTL_SECS);
        let token = SigningBackend::ManagementJwt
            .sign_access(&key, window, "room-42", "D-AB12C", Role::Clinician)
            .expect("should sign");

        let claims = decode_room_access(&token, TEST_SECRET).expect("should decode");
        assert_eq!(claims.room_id, "room-42");
        assert_eq!(claims.user_id, "D-AB12C");
        assert_eq!(claims.role, Role::Clinician);
        assert_eq!(claims.token_type, "app");
        assert_eq!(claims.version, CLAIMS_VERSION);
        assert_eq!(claims.exp - claims.iat, DEFAULT_ACCESS_TTL_SECS);
        assert_eq!(claims.nbf, claims.iat);
    }

    #[test]
    fn management_token_carries_management_type_and_24h_ttl() {
        let key = test_key();
        let window = stamp(Utc::now().timestamp(), crate::expiry::MANAGEMENT_TTL_SECS);
        let claims = build_management_claims(&key, window);
        let token = sign_jwt(&claims, key.secret()).expect("should sign");

        let decoded = decode_management(&token, TEST_SECRET).expect("should decode");
        assert_eq!(decoded.token_type, "management");
        assert_eq!(decoded.access_key, "access-key-1");
        assert_eq!(decoded.exp - decoded.iat, 24 * 3600);
    }

    #[test]
    fn direct_join_token_has_one_hour_ttl() {
        let key = test_key();
        let now = Utc::now().timestamp();
        let ttl = SigningBackend::DirectJwt.access_ttl_secs(DEFAULT_ACCESS_TTL_SECS);
        assert_eq!(ttl, 3600);

        let token = SigningBackend::DirectJwt
            .sign_access(&key, stamp(now, ttl), "consult-xyz", "9f3a", Role::Patient)
            .expect("should sign");
        let claims = decode_direct_join(&token, TEST_SECRET).expect("should decode");
        assert_eq!(claims.channel, "consult-xyz");
        assert_eq!(claims.uid, "9f3a");
        assert_eq!(claims.role, Role::Patient);
        assert_eq!(claims.exp, now + 3600);
    }

    #[test]
    fn two_credentials_for_same_room_and_subject_have_distinct_nonces() {
        let key = test_key();
        let window = stamp(Utc::now().timestamp(), DEFAULT_ACCESS_TTL_SECS);

        let a = SigningBackend::ManagementJwt
            .sign_access(&key, window, "room-1", "9f3a", Role::Patient)
            .expect("sign a");
        let b = SigningBackend::ManagementJwt
            .sign_access(&key, window, "room-1", "9f3a", Role::Patient)
            .expect("sign b");

        let ca = decode_room_access(&a, TEST_SECRET).expect("decode a");
        let cb = decode_room_access(&b, TEST_SECRET).expect("decode b");
        assert_ne!(ca.jti, cb.jti);
        // Both remain independently valid.
        assert_eq!(ca.room_id, cb.room_id);
        assert_eq!(ca.exp, cb.exp);
    }

    #[test]
    fn compact_backend_produces_verifiable_envelope() {
        let key = test_key();
        let now = Utc::now().timestamp();
        let window = stamp(now, DEFAULT_ACCESS_TTL_SECS);
        let token = SigningBackend::CompactHmac
            .sign_access(&key, window, "ignored-room", "9f3a", Role::Patient)
            .expect("should sign");

        let claims = compact::verify(&token, TEST_SECRET, now).expect("should verify");
        assert_eq!(claims.app_id, "access-key-1");
        assert_eq!(claims.user_id, "9f3a");
        assert_eq!(claims.expire - claims.ctime, DEFAULT_ACCESS_TTL_SECS);
    }

    #[test]
    fn compact_nonces_differ_between_issuances() {
        let key = test_key();
        let now = Utc::now().timestamp();
        let window = stamp(now, DEFAULT_ACCESS_TTL_SECS);
        let a = SigningBackend::CompactHmac
            .sign_access(&key, window, "r", "u", Role::Patient)
            .expect("sign a");
        let b = SigningBackend::CompactHmac
            .sign_access(&key, window, "r", "u", Role::Patient)
            .expect("sign b");
        let ca = compact::verify(&a, TEST_SECRET, now).expect("verify a");
        let cb = compact::verify(&b, TEST_SECRET, now).expect("verify b");
        assert_ne!(ca.nonce, cb.nonce);
    }

    #[test]
    fn wrong_secret_fails_jwt_verification() {
        let key = test_key();
        let window = stamp(Utc::now().timestamp(), DEFAULT_ACCESS_TTL_SECS);
        let token = SigningBackend::ManagementJwt
            .sign_access(&key, window, "room-1", "u", Role::Patient)
            .expect("sign");
        assert!(decode_room_access(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_jwt_is_rejected_with_zero_leeway() {
        let key = test_key();
        // Issued 2 hours ago with a 1 hour TTL.
        let window = stamp(Utc::now().timestamp() - 7200, 3600);
        let token = SigningBackend::ManagementJwt
            .sign_access(&key, window, "room-1", "u", Role::Patient)
            .expect("sign");
        assert!(decode_room_access(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn signing_key_debug_masks_the_secret() {
        let key = test_key();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains(TEST_SECRET));
        assert!(rendered.contains("access-key-1"));
    }

    #[test]
    fn backend_provisioning_pairing() {
        assert_eq!(
            SigningBackend::ManagementJwt.provisioning(),
            Provisioning::RemoteProvisioned
        );
        assert_eq!(
            SigningBackend::DirectJwt.provisioning(),
            Provisioning::LocallyGenerated
        );
        assert_eq!(
            SigningBackend::CompactHmac.provisioning(),
            Provisioning::LocallyGenerated
        );
    }
}

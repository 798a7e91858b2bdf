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

//! Session authentication and the role gate.
//!
//! `SessionUser` pulls the caller's identity out of the session JWT in the
//! `Authorization: Bearer` header. The session token is minted by the
//! identity service (out of scope here); this subsystem only verifies it.
//!
//! [`authorize`] is the single place role policy is evaluated: every
//! privileged operation goes through it before touching rooms or credentials.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use telecare_consult_types::{Identity, Role};

use crate::error::AppError;
use crate::state::AppState;

/// Claims of the caller's session JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject identifier (clinician or patient id).
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

/// Extractor that resolves the authenticated caller from the bearer token.
///
/// Usage in a handler:
/// ```ignore
/// async fn my_handler(session: SessionUser) { ... }
/// ```
#[derive(Debug)]
pub struct SessionUser {
    pub subject_id: String,
    pub role: Role,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(AppError::unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(AppError::unauthorized)?;

        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(state.session_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::unauthorized_with_detail(&e.to_string()))?;

        Ok(SessionUser {
            subject_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}

/// Reject callers whose role does not match, and unapproved clinicians.
///
/// The 403 response never reveals whether any room or identity exists.
pub fn authorize(identity: &Identity, required: Role) -> Result<(), AppError> {
    if identity.role != required {
        return Err(AppError::forbidden(&required.to_string()));
    }
    match identity.role {
        Role::Clinician if !identity.approved => Err(AppError::forbidden("Clinician")),
        Role::Clinician | Role::Patient => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SESSION_SECRET: &str = "session-test-secret";

    fn test_state() -> AppState {
        AppState::for_tests(
            SESSION_SECRET,
            crate::token::SigningBackend::ManagementJwt,
            None,
            vec![],
        )
    }

    fn session_token(sub: &str, role: Role, exp: i64) -> String {
        let claims = SessionClaims {
            sub: sub.to_string(),
            role,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SESSION_SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn extract(auth_header: Option<String>) -> Result<SessionUser, AppError> {
        let mut builder = Request::builder().uri("/test").method("POST");
        if let Some(val) = auth_header {
            builder = builder.header(header::AUTHORIZATION, val);
        }
        let req = builder.body(()).unwrap();
        let (mut parts, _body) = req.into_parts();
        SessionUser::from_request_parts(&mut parts, &test_state()).await
    }

    #[tokio::test]
    async fn valid_bearer_token_yields_session_user() {
        let token = session_token("D-AB12C", Role::Clinician, Utc::now().timestamp() + 600);
        let user = extract(Some(format!("Bearer {token}")))
            .await
            .expect("should succeed");
        assert_eq!(user.subject_id, "D-AB12C");
        assert_eq!(user.role, Role::Clinician);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let err = extract(None).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.body.code, "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_unauthorized() {
        let err = extract(Some("Basic dXNlcjpwdw==".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_session_token_is_unauthorized() {
        let token = session_token("9f3a", Role::Patient, Utc::now().timestamp() - 10);
        let err = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_signed_with_wrong_secret_is_unauthorized() {
        let claims = SessionClaims {
            sub: "9f3a".to_string(),
            role: Role::Patient,
            exp: Utc::now().timestamp() + 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"not-the-session-secret"),
        )
        .unwrap();
        let err = extract(Some(format!("Bearer {token}"))).await.unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    fn identity(role: Role, approved: bool) -> Identity {
        Identity {
            subject_id: "subject".to_string(),
            role,
            approved,
            display_name: None,
        }
    }

    #[test]
    fn approved_clinician_passes_the_gate() {
        assert!(authorize(&identity(Role::Clinician, true), Role::Clinician).is_ok());
    }

    #[test]
    fn patient_requesting_clinician_operation_is_forbidden() {
        let err = authorize(&identity(Role::Patient, true), Role::Clinician).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.body.code, "FORBIDDEN");
    }

    #[test]
    fn unapproved_clinician_is_forbidden() {
        let err = authorize(&identity(Role::Clinician, false), Role::Clinician).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn patient_gate_ignores_approved_flag() {
        assert!(authorize(&identity(Role::Patient, false), Role::Patient).is_ok());
    }

    #[test]
    fn clinician_requesting_patient_operation_is_forbidden() {
        let err = authorize(&identity(Role::Clinician, true), Role::Patient).unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}

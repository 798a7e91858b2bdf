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

//! API error types.
//!
//! Every failed API response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"FORBIDDEN"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail that is useful
/// during development but should be stripped or redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"UNAUTHORIZED"`, `"NOT_CONFIGURED"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,
}

impl APIError {
    pub fn unauthorized() -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Authentication required.".to_string(),
            engineering_error: None,
        }
    }

    pub fn unauthorized_with_detail(detail: &str) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: "Authentication required.".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }

    /// Role mismatch or unapproved clinician. Deliberately says nothing about
    /// whether the room or identity exists.
    pub fn forbidden(required: &str) -> Self {
        Self {
            code: "FORBIDDEN".to_string(),
            message: format!("Access forbidden: {required} access required"),
            engineering_error: None,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Self {
            code: "MISSING_FIELD".to_string(),
            message: format!("{field} is required"),
            engineering_error: None,
        }
    }

    pub fn invalid_room_id(detail: &str) -> Self {
        Self {
            code: "INVALID_ROOM_ID".to_string(),
            message: format!("Invalid room ID: {detail}"),
            engineering_error: None,
        }
    }

    pub fn patient_not_found(patient_id: &str) -> Self {
        Self {
            code: "PATIENT_NOT_FOUND".to_string(),
            message: format!("Patient '{patient_id}' not found"),
            engineering_error: None,
        }
    }

    /// The deployment lacks a signing secret or provider identifier.
    /// Issuance fails closed; a token is never built from an empty secret.
    pub fn not_configured(what: &str) -> Self {
        Self {
            code: "NOT_CONFIGURED".to_string(),
            message: "Video call service is not configured".to_string(),
            engineering_error: Some(what.to_string()),
        }
    }

    pub fn upstream_unavailable(detail: &str) -> Self {
        Self {
            code: "UPSTREAM_UNAVAILABLE".to_string(),
            message: "Failed to reach the video call platform".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }

    pub fn internal_error(detail: &str) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: "Internal server error".to_string(),
            engineering_error: Some(detail.to_string()),
        }
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}

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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code. No partial credential ever
//! accompanies an error response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use telecare_consult_types::{APIError, APIResponse};

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, APIError::unauthorized())
    }

    pub fn unauthorized_with_detail(detail: &str) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            APIError::unauthorized_with_detail(detail),
        )
    }

    pub fn forbidden(required: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, APIError::forbidden(required))
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::missing_field(field))
    }

    pub fn invalid_room_id(detail: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, APIError::invalid_room_id(detail))
    }

    pub fn patient_not_found(patient_id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            APIError::patient_not_found(patient_id),
        )
    }

    pub fn not_configured(what: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            APIError::not_configured(what),
        )
    }

    pub fn upstream_unavailable(detail: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            APIError::upstream_unavailable(detail),
        )
    }

    pub fn internal(detail: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            APIError::internal_error(detail),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    /// Consume the response body and deserialize it to `APIResponse<APIError>`.
    async fn read_error_body(resp: Response) -> (StatusCode, APIResponse<APIError>) {
        let status = resp.status();
        let bytes = Body::new(resp.into_body())
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        let parsed: APIResponse<APIError> =
            serde_json::from_slice(&bytes).expect("deserialize error body");
        (status, parsed)
    }

    #[tokio::test]
    async fn forbidden_produces_403_with_correct_code() {
        let err = AppError::forbidden("Clinician");
        let resp = err.into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!body.success);
        assert_eq!(body.result.code, "FORBIDDEN");
    }

    #[tokio::test]
    async fn missing_field_produces_400() {
        let err = AppError::missing_field("patient_id");
        let resp = err.into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.result.code, "MISSING_FIELD");
        assert!(body.result.message.contains("patient_id"));
    }

    #[tokio::test]
    async fn not_configured_produces_503() {
        let err = AppError::not_configured("PROVIDER_SECRET is unset");
        let resp = err.into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.result.code, "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn upstream_unavailable_produces_503() {
        let err = AppError::upstream_unavailable("room creation returned 500");
        let resp = err.into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.result.code, "UPSTREAM_UNAVAILABLE");
        assert_eq!(
            body.result.engineering_error.as_deref(),
            Some("room creation returned 500")
        );
    }

    #[tokio::test]
    async fn patient_not_found_produces_404() {
        let err = AppError::patient_not_found("9f3a");
        let resp = err.into_response();
        let (status, body) = read_error_body(resp).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.result.code, "PATIENT_NOT_FOUND");
    }
}

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

//! Handlers for the consult call credential surface.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use telecare_consult_types::{
    requests::CreateCallRequest,
    responses::{APIResponse, CreateCallResponse, JoinCredentialResponse},
    Identity, Role,
};

use crate::auth::{authorize, SessionUser};
use crate::error::AppError;
use crate::state::AppState;

const VALID_ROOM_ID_PATTERN: &str = "^[a-zA-Z0-9_-]+$";

fn validate_room_id(room_id: &str) -> Result<(), AppError> {
    if room_id.is_empty() {
        return Err(AppError::invalid_room_id("cannot be empty"));
    }
    if room_id.len() > 255 {
        return Err(AppError::invalid_room_id("cannot exceed 255 characters"));
    }
    let re = regex::Regex::new(VALID_ROOM_ID_PATTERN).expect("valid regex");
    if !re.is_match(room_id) {
        return Err(AppError::invalid_room_id(&format!(
            "must match pattern: {VALID_ROOM_ID_PATTERN}"
        )));
    }
    Ok(())
}

/// Resolve the session subject against the role directory. A session whose
/// subject has disappeared from the directory is no longer authenticated.
async fn resolve_caller(state: &AppState, session: &SessionUser) -> Result<Identity, AppError> {
    state
        .directory
        .lookup(&session.subject_id)
        .await?
        .ok_or_else(|| AppError::unauthorized_with_detail("subject not in role directory"))
}

/// POST /api/v1/calls
///
/// Clinician-only. Creates a room for a call with the named patient, issues
/// the clinician's joining credential, and fires a best-effort invite
/// notification to the patient.
pub async fn create_call(
    State(state): State<AppState>,
    session: SessionUser,
    body: Option<Json<CreateCallRequest>>,
) -> Result<(StatusCode, Json<APIResponse<CreateCallResponse>>), AppError> {
    let patient_id = body
        .as_ref()
        .and_then(|b| b.patient_id.as_deref())
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::missing_field("patient_id"))?
        .to_string();

    let caller = resolve_caller(&state, &session).await?;
    // Gate before the patient lookup so a non-clinician learns nothing about
    // which patient identifiers exist.
    authorize(&caller, Role::Clinician)?;

    let patient = state
        .directory
        .lookup(&patient_id)
        .await?
        .filter(|identity| identity.role == Role::Patient)
        .ok_or_else(|| AppError::patient_not_found(&patient_id))?;

    let (room, credential) = state.issuer.create_call(&caller, &patient).await?;

    if let Err(e) = state
        .notifier
        .notify_invite(&patient.subject_id, &room.room_id)
        .await
    {
        // Best-effort only: the room stays joinable without the notification.
        tracing::warn!(
            patient_id = %patient.subject_id,
            room_id = %room.room_id,
            "Call invite notification failed: {e}"
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(APIResponse::ok(CreateCallResponse {
            room_id: room.room_id,
            credential,
        })),
    ))
}

/// POST /api/v1/calls/{room_id}/credential
///
/// Patient-only. The identity is asserted from the caller's own session,
/// never accepted as a parameter.
pub async fn join_credential(
    State(state): State<AppState>,
    session: SessionUser,
    Path(room_id): Path<String>,
) -> Result<Json<APIResponse<JoinCredentialResponse>>, AppError> {
    validate_room_id(&room_id)?;

    let caller = resolve_caller(&state, &session).await?;
    let credential = state.issuer.join_credential(&caller, &room_id)?;

    Ok(Json(APIResponse::ok(JoinCredentialResponse { credential })))
}

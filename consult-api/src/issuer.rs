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

//! The credential issuance façade.
//!
//! Single-shot and stateless: authorize, resolve the room, stamp the
//! validity window, sign. No credential is ever stored; a credential's only
//! states (not-yet-valid, valid, expired) derive from wall-clock comparison
//! against its own claims.

use chrono::Utc;
use telecare_consult_types::{Identity, Role, Room};

use crate::auth::authorize;
use crate::error::AppError;
use crate::expiry::stamp;
use crate::rooms::RoomAuthority;
use crate::token::{SigningBackend, SigningKey};

/// Issues signed joining credentials for consult calls.
#[derive(Clone)]
pub struct CredentialIssuer {
    backend: SigningBackend,
    key: Option<SigningKey>,
    rooms: RoomAuthority,
    configured_ttl_secs: i64,
}

impl CredentialIssuer {
    pub fn new(
        backend: SigningBackend,
        key: Option<SigningKey>,
        rooms: RoomAuthority,
        configured_ttl_secs: i64,
    ) -> Self {
        Self {
            backend,
            key,
            rooms,
            configured_ttl_secs,
        }
    }

    fn key(&self) -> Result<&SigningKey, AppError> {
        self.key
            .as_ref()
            .ok_or_else(|| AppError::not_configured("provider signing key is unset"))
    }

    /// Clinician-only: create a room for a call with `patient` and issue the
    /// clinician's own joining credential.
    pub async fn create_call(
        &self,
        clinician: &Identity,
        patient: &Identity,
    ) -> Result<(Room, String), AppError> {
        authorize(clinician, Role::Clinician)?;
        let key = self.key()?;

        let now = Utc::now().timestamp();
        let patient_name = patient
            .display_name
            .as_deref()
            .unwrap_or(&patient.subject_id);
        let room = self
            .rooms
            .create_room(Some(key), &clinician.subject_id, patient_name, now)
            .await?;

        let window = stamp(now, self.backend.access_ttl_secs(self.configured_ttl_secs));
        let credential = self.backend.sign_access(
            key,
            window,
            &room.room_id,
            &clinician.subject_id,
            Role::Clinician,
        )?;
        Ok((room, credential))
    }

    /// Patient-only: issue a joining credential for an existing room. The
    /// room needs no lookup; the credential binds the caller's own identity.
    pub fn join_credential(&self, patient: &Identity, room_id: &str) -> Result<String, AppError> {
        authorize(patient, Role::Patient)?;
        let key = self.key()?;

        let now = Utc::now().timestamp();
        let window = stamp(now, self.backend.access_ttl_secs(self.configured_ttl_secs));
        self.backend
            .sign_access(key, window, room_id, &patient.subject_id, Role::Patient)
    }
}

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

//! Room provisioning.
//!
//! One capability with two strategies: either the room is registered with
//! the remote platform through a management-scoped call, or an opaque
//! identifier is synthesized locally and the platform accepts it at join
//! time. The upstream call is not retried; failure propagates to the caller.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use telecare_consult_types::{Provisioning, Room};
use uuid::Uuid;

use crate::error::AppError;
use crate::expiry::{stamp, MANAGEMENT_TTL_SECS};
use crate::token::{build_management_claims, sign_jwt, SigningKey};

/// Decides which provisioning strategy backs this deployment and executes it.
#[derive(Clone)]
pub struct RoomAuthority {
    mode: ProvisioningMode,
}

#[derive(Clone)]
enum ProvisioningMode {
    Remote(RemoteRoomClient),
    Local,
}

#[derive(Serialize)]
struct CreateRoomBody<'a> {
    name: String,
    description: &'static str,
    template_id: &'a str,
}

#[derive(Deserialize)]
struct CreateRoomReply {
    id: String,
}

/// Client for the remote platform's room-creation endpoint.
#[derive(Clone)]
pub struct RemoteRoomClient {
    client: reqwest::Client,
    api_base: String,
    template_id: Option<String>,
}

impl RemoteRoomClient {
    pub fn new(client: reqwest::Client, api_base: String, template_id: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            template_id,
        }
    }

    /// Register a room with the remote platform, authenticating with a
    /// freshly built management credential.
    async fn create(
        &self,
        key: &SigningKey,
        patient_name: &str,
        now: i64,
    ) -> Result<String, AppError> {
        let template_id = self
            .template_id
            .as_deref()
            .ok_or_else(|| AppError::not_configured("PROVIDER_TEMPLATE_ID is unset"))?;

        let management_claims = build_management_claims(key, stamp(now, MANAGEMENT_TTL_SECS));
        let management_token = sign_jwt(&management_claims, key.secret())?;

        let when = Utc
            .timestamp_opt(now, 0)
            .single()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let body = CreateRoomBody {
            name: format!("Call with {patient_name} - {when}"),
            description: "One-on-one telemedicine call",
            template_id,
        };

        let resp = self
            .client
            .post(format!("{}/rooms", self.api_base))
            .bearer_auth(&management_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Room creation request failed: {e}");
                AppError::upstream_unavailable("room creation request failed")
            })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            tracing::error!("Room creation returned {status}: {text}");
            return Err(AppError::upstream_unavailable(&format!(
                "room creation returned {status}"
            )));
        }

        let reply = resp.json::<CreateRoomReply>().await.map_err(|e| {
            tracing::error!("Room creation reply was malformed: {e}");
            AppError::upstream_unavailable("malformed room creation reply")
        })?;
        Ok(reply.id)
    }
}

impl RoomAuthority {
    pub fn remote(client: RemoteRoomClient) -> Self {
        Self {
            mode: ProvisioningMode::Remote(client),
        }
    }

    pub fn local() -> Self {
        Self {
            mode: ProvisioningMode::Local,
        }
    }

    /// Create a room for a call attempt. The returned [`Room`] is immutable
    /// and lives only as long as the issuing request.
    pub async fn create_room(
        &self,
        key: Option<&SigningKey>,
        created_by: &str,
        patient_name: &str,
        now: i64,
    ) -> Result<Room, AppError> {
        match &self.mode {
            ProvisioningMode::Remote(remote) => {
                let key = key
                    .ok_or_else(|| AppError::not_configured("provider signing key is unset"))?;
                let room_id = remote.create(key, patient_name, now).await?;
                Ok(Room {
                    room_id,
                    created_by: created_by.to_string(),
                    created_at: now,
                    provisioning: Provisioning::RemoteProvisioned,
                })
            }
            ProvisioningMode::Local => Ok(Room {
                room_id: format!("consult-{}", Uuid::new_v4().simple()),
                created_by: created_by.to_string(),
                created_at: now,
                provisioning: Provisioning::LocallyGenerated,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn local_rooms_are_unique_and_locally_provisioned() {
        let authority = RoomAuthority::local();
        let a = authority
            .create_room(None, "D-AB12C", "Jane Doe", 1_700_000_000)
            .await
            .expect("local rooms always succeed");
        let b = authority
            .create_room(None, "D-AB12C", "Jane Doe", 1_700_000_000)
            .await
            .expect("local rooms always succeed");
        assert_ne!(a.room_id, b.room_id);
        assert_eq!(a.provisioning, Provisioning::LocallyGenerated);
        assert_eq!(a.created_by, "D-AB12C");
        assert_eq!(a.created_at, 1_700_000_000);
    }

    #[tokio::test]
    async fn remote_without_signing_key_fails_closed() {
        let remote = RemoteRoomClient::new(
            reqwest::Client::new(),
            "https://api.example.test/v2".to_string(),
            Some("template-1".to_string()),
        );
        let authority = RoomAuthority::remote(remote);
        let err = authority
            .create_room(None, "D-AB12C", "Jane Doe", 1_700_000_000)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.body.code, "NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn remote_without_template_fails_closed() {
        let remote = RemoteRoomClient::new(
            reqwest::Client::new(),
            "https://api.example.test/v2".to_string(),
            None,
        );
        let authority = RoomAuthority::remote(remote);
        let key = SigningKey::new("ak".to_string(), "secret".to_string());
        let err = authority
            .create_room(Some(&key), "D-AB12C", "Jane Doe", 1_700_000_000)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.body.code, "NOT_CONFIGURED");
    }
}

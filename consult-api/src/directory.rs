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

//! Role directory lookup.
//!
//! The directory is an external collaborator: registration, passwords, and
//! profiles live elsewhere. This subsystem only reads
//! `{subject_id, role, approved}` snapshots. The lookup is idempotent and
//! safe to retry; staleness is tolerated until the next request.

use async_trait::async_trait;
use telecare_consult_types::Identity;

use crate::error::AppError;

/// Read-only role lookup contract.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Resolve `subject_id`, returning `None` for unknown subjects.
    async fn lookup(&self, subject_id: &str) -> Result<Option<Identity>, AppError>;
}

/// Directory client backed by the identity service's HTTP API.
pub struct HttpRoleDirectory {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRoleDirectory {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl RoleDirectory for HttpRoleDirectory {
    async fn lookup(&self, subject_id: &str) -> Result<Option<Identity>, AppError> {
        let url = format!("{}/identities/{subject_id}", self.base_url);
        let resp = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Role directory unreachable: {e}");
            AppError::upstream_unavailable("role directory unreachable")
        })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            tracing::error!("Role directory returned {}", resp.status());
            return Err(AppError::upstream_unavailable("role directory error"));
        }

        let identity = resp.json::<Identity>().await.map_err(|e| {
            tracing::error!("Role directory returned malformed identity: {e}");
            AppError::upstream_unavailable("malformed identity record")
        })?;
        Ok(Some(identity))
    }
}

/// In-memory directory for tests and local development.
#[derive(Default)]
pub struct StaticRoleDirectory {
    identities: Vec<Identity>,
}

impl StaticRoleDirectory {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }
}

#[async_trait]
impl RoleDirectory for StaticRoleDirectory {
    async fn lookup(&self, subject_id: &str) -> Result<Option<Identity>, AppError> {
        Ok(self
            .identities
            .iter()
            .find(|i| i.subject_id == subject_id)
            .cloned())
    }
}

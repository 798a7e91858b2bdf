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

//! Shared application state passed to every Axum handler via `State`.
//!
//! Everything in here is immutable after startup, so issuance stays
//! embarrassingly parallel: no locks, no cross-request mutable state.

use std::sync::Arc;

use crate::config::Config;
use crate::directory::{HttpRoleDirectory, RoleDirectory};
use crate::issuer::CredentialIssuer;
use crate::notify::{CallNotifier, HttpCallNotifier, NoopNotifier};
use crate::rooms::{RemoteRoomClient, RoomAuthority};
use crate::token::SigningKey;
use telecare_consult_types::Provisioning;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Secret used to verify caller session JWTs.
    pub session_secret: String,
    /// The credential issuance façade.
    pub issuer: CredentialIssuer,
    /// External role lookup.
    pub directory: Arc<dyn RoleDirectory>,
    /// Best-effort invite notification.
    pub notifier: Arc<dyn CallNotifier>,
}

impl AppState {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        let key = match (&config.provider_access_key, &config.provider_secret) {
            (Some(access_key), Some(secret)) => {
                Some(SigningKey::new(access_key.clone(), secret.clone()))
            }
            _ => None,
        };

        let rooms = match config.backend.provisioning() {
            Provisioning::RemoteProvisioned => RoomAuthority::remote(RemoteRoomClient::new(
                http.clone(),
                config.provider_api_base.clone(),
                config.provider_template_id.clone(),
            )),
            Provisioning::LocallyGenerated => RoomAuthority::local(),
        };

        let issuer =
            CredentialIssuer::new(config.backend, key, rooms, config.access_token_ttl_secs);

        let directory: Arc<dyn RoleDirectory> = Arc::new(HttpRoleDirectory::new(
            http.clone(),
            config.directory_url.clone(),
        ));

        let notifier: Arc<dyn CallNotifier> = match &config.notify_url {
            Some(url) => Arc::new(HttpCallNotifier::new(http, url.clone())),
            None => Arc::new(NoopNotifier),
        };

        Self {
            session_secret: config.session_secret.clone(),
            issuer,
            directory,
            notifier,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State with a static directory and local rooms, for handler tests.
    pub fn for_tests(
        session_secret: &str,
        backend: crate::token::SigningBackend,
        key: Option<SigningKey>,
        identities: Vec<telecare_consult_types::Identity>,
    ) -> Self {
        Self {
            session_secret: session_secret.to_string(),
            issuer: CredentialIssuer::new(
                backend,
                key,
                RoomAuthority::local(),
                crate::expiry::DEFAULT_ACCESS_TTL_SECS,
            ),
            directory: Arc::new(crate::directory::StaticRoleDirectory::new(identities)),
            notifier: Arc::new(NoopNotifier),
        }
    }

    /// Swap in a caller-supplied notifier, for exercising the best-effort path.
    pub fn with_notifier(mut self, notifier: Arc<dyn CallNotifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

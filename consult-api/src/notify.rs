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

//! Best-effort call-invite notification.
//!
//! Delivery is an external collaborator's job; from this subsystem's
//! perspective the call is fire-and-forget. A failed notification is logged
//! at warn level and never rolls back room creation: the room remains
//! independently joinable.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Notification delivery failure. Surfaces as a warning, never as a hard error.
#[derive(Debug)]
pub struct NotifyError(pub String);

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl std::error::Error for NotifyError {}

/// Fire-and-forget invite notification contract.
#[async_trait]
pub trait CallNotifier: Send + Sync {
    async fn notify_invite(&self, patient_id: &str, room_id: &str) -> Result<(), NotifyError>;
}

#[derive(Serialize)]
struct InviteNotification<'a> {
    patient_id: &'a str,
    room_id: &'a str,
    event: &'static str,
}

/// Notifier that POSTs the invite to a configured webhook.
pub struct HttpCallNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl HttpCallNotifier {
    pub fn new(client: reqwest::Client, webhook_url: String) -> Self {
        Self {
            client,
            webhook_url,
        }
    }
}

#[async_trait]
impl CallNotifier for HttpCallNotifier {
    async fn notify_invite(&self, patient_id: &str, room_id: &str) -> Result<(), NotifyError> {
        let body = InviteNotification {
            patient_id,
            room_id,
            event: "call_invite",
        };
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError(e.to_string()))?;
        if !resp.status().is_success() {
            return Err(NotifyError(format!("webhook returned {}", resp.status())));
        }
        Ok(())
    }
}

/// Notifier used when no webhook is configured.
pub struct NoopNotifier;

#[async_trait]
impl CallNotifier for NoopNotifier {
    async fn notify_invite(&self, _patient_id: &str, _room_id: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}

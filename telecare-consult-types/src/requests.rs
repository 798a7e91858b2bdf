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

//! Request types for the consult backend REST API.
//!
//! These types define the shape of request bodies. They are used by both the
//! server (for deserialization) and clients (for serialization).

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/calls`.
///
/// The clinician's own identity comes from the session, never from the body.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCallRequest {
    /// The patient to invite. Validated against the role directory.
    #[serde(default)]
    pub patient_id: Option<String>,
}

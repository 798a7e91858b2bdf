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

//! Response types for the consult backend REST API.
//!
//! Every endpoint returns an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

/// Top-level API response envelope.
///
/// All consult backend endpoints wrap their payload in this structure so that
/// clients always see a consistent `{ "success", "result" }` shape.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

/// Response payload for `POST /api/v1/calls` (201 Created).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCallResponse {
    /// Room identifier, platform-assigned or locally generated.
    pub room_id: String,
    /// The clinician's own signed joining credential.
    pub credential: String,
}

/// Response payload for `POST /api/v1/calls/{room_id}/credential`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct JoinCredentialResponse {
    pub credential: String,
}

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

//! The transient room a consult call takes place in.

use serde::{Deserialize, Serialize};

/// How a room identifier came to exist.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Provisioning {
    /// The room was registered with the remote platform via its management
    /// API; the identifier is platform-assigned.
    RemoteProvisioned,
    /// The identifier was synthesized locally; the platform accepts any
    /// caller-chosen room name at join time.
    LocallyGenerated,
}

/// A room, created once per call attempt and immutable afterwards.
///
/// Rooms are not persisted by this subsystem; the struct exists only for the
/// duration of the issuing request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Room {
    pub room_id: String,
    pub created_by: String,
    /// Unix timestamp in seconds.
    pub created_at: i64,
    pub provisioning: Provisioning,
}

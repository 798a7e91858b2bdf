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

//! Credential claim sets.
//!
//! Each signing backend embeds one of these structs in the credential it
//! produces. The signature covers the entire serialized claim set
//! byte-for-byte: mutate any field and verification fails.

use serde::{Deserialize, Serialize};

use crate::identity::Role;

/// Claim-set schema version shared by the JWT-shaped credentials.
pub const CLAIMS_VERSION: u32 = 2;

/// Claims of the short-lived management credential used to authenticate the
/// backend's own calls to the remote platform's administrative API.
///
/// Never exposed to end clients.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ManagementClaims {
    pub access_key: String,
    /// Always `"management"`.
    #[serde(rename = "type")]
    pub token_type: String,
    pub version: u32,
    /// Per-issuance nonce (UUID).
    pub jti: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl ManagementClaims {
    pub const TOKEN_TYPE: &'static str = "management";
}

/// Claims of a per-party room access credential (management-JWT deployments).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RoomAccessClaims {
    pub access_key: String,
    pub room_id: String,
    pub user_id: String,
    pub role: Role,
    /// Always `"app"`.
    #[serde(rename = "type")]
    pub token_type: String,
    pub version: u32,
    /// Per-issuance nonce (UUID).
    pub jti: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl RoomAccessClaims {
    pub const TOKEN_TYPE: &'static str = "app";
}

/// Claims of a direct-join credential: no management round-trip, the room
/// needs no remote registration, so the claim set is smaller and the TTL
/// shorter.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DirectJoinClaims {
    pub app_id: String,
    /// The room/channel name the holder may join.
    pub channel: String,
    pub uid: String,
    pub role: Role,
    pub exp: i64,
}

/// Claims carried inside the compact binary credential (see [`crate::compact`]).
///
/// No room binding: the platform behind this scheme scopes the credential to
/// the application, with the room chosen at join time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CompactClaims {
    pub app_id: String,
    pub user_id: String,
    /// Per-issuance 32-bit random value.
    pub nonce: u32,
    /// Creation time, Unix seconds.
    pub ctime: i64,
    /// Expiry, Unix seconds. Enforced strictly by the verifier.
    pub expire: i64,
}

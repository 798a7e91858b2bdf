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

//! Expiry stamping for issued credentials.
//!
//! TTL is a property of the token class, never caller-supplied, so a caller
//! cannot extend its own privileges. `not_before` always equals issue time:
//! this design mints no pre-dated tokens.

/// Management credential TTL: 24 hours.
pub const MANAGEMENT_TTL_SECS: i64 = 24 * 3600;

/// Direct-join credential TTL: 1 hour. The room needs no remote
/// registration, so the credential is short-lived.
pub const DIRECT_JOIN_TTL_SECS: i64 = 3600;

/// Default room access credential TTL: 24 hours.
pub const DEFAULT_ACCESS_TTL_SECS: i64 = 24 * 3600;

/// The timing claims stamped into every credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenWindow {
    pub issued_at: i64,
    pub not_before: i64,
    pub expires_at: i64,
}

/// Compute the validity window for a credential issued at `now`.
pub fn stamp(now: i64, ttl_secs: i64) -> TokenWindow {
    TokenWindow {
        issued_at: now,
        not_before: now,
        expires_at: now + ttl_secs,
    }
}

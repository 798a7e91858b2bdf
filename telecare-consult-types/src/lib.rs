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

//! Shared API types for the telecare consult backend.
//!
//! This crate defines the API contract between the consult backend and its
//! consumers (clients, frontend, integration tests), plus the claim sets and
//! the compact binary credential codec. It is intentionally
//! framework-agnostic — no axum, no HTTP client types — so a constrained
//! verifying client can depend on it without pulling in the server stack.

pub mod claims;
pub mod compact;
pub mod error;
pub mod identity;
pub mod requests;
pub mod responses;
pub mod room;

pub use error::APIError;
pub use identity::{Identity, Role};
pub use responses::APIResponse;
pub use room::{Provisioning, Room};

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

//! Consult call credential API library.
//!
//! This crate provides the Axum router, application state, and configuration
//! for the consult credential service: it authorizes a clinician and a
//! patient to join a transient video call room and issues the signed joining
//! credentials, without ever exposing the platform secret to a client. The
//! binary entry point (`main.rs`) is a thin wrapper that calls into this
//! library.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod expiry;
pub mod issuer;
pub mod notify;
pub mod rooms;
pub mod routes;
pub mod state;
pub mod token;

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

//! Application configuration loaded from environment variables.
//!
//! Provider credentials are deliberately optional: a deployment with no
//! signing secret still starts, and every issuance call fails closed with
//! 503 instead of minting tokens from an empty secret.

use std::env;

use crate::token::SigningBackend;

/// Configuration for the consult credential API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8082").
    pub listen_addr: String,
    /// Shared secret used to verify caller session JWTs (HMAC-SHA256).
    pub session_secret: String,
    /// Base URL of the role directory service.
    pub directory_url: String,
    /// Webhook for call-invite notifications. `None` disables notification.
    pub notify_url: Option<String>,
    /// Credential encoding for this deployment.
    pub backend: SigningBackend,
    /// Provider application/access identifier. Issuance fails closed without it.
    pub provider_access_key: Option<String>,
    /// Provider signing secret. Issuance fails closed without it.
    pub provider_secret: Option<String>,
    /// Room template for remote provisioning.
    pub provider_template_id: Option<String>,
    /// Base URL of the remote platform's management API.
    pub provider_api_base: String,
    /// Room access token TTL in seconds (default 86400 = 24 h).
    /// Direct-JWT deployments ignore this and use the fixed 1 h TTL.
    pub access_token_ttl_secs: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `SESSION_JWT_SECRET`
    /// - `DIRECTORY_URL`
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8082"`)
    /// - `PROVIDER_SCHEME` (default: `"management-jwt"`)
    /// - `PROVIDER_ACCESS_KEY`, `PROVIDER_SECRET`, `PROVIDER_TEMPLATE_ID`
    /// - `PROVIDER_API_BASE_URL` (default: `"https://api.100ms.live/v2"`)
    /// - `ACCESS_TOKEN_TTL_SECS` (default: `"86400"`)
    /// - `NOTIFY_URL`
    pub fn from_env() -> Result<Self, String> {
        let session_secret = env::var("SESSION_JWT_SECRET")
            .map_err(|_| "SESSION_JWT_SECRET environment variable is required")?;
        let directory_url = env::var("DIRECTORY_URL")
            .map_err(|_| "DIRECTORY_URL environment variable is required")?;

        let listen_addr = env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8082".to_string());
        let backend = SigningBackend::parse(
            &env::var("PROVIDER_SCHEME").unwrap_or_else(|_| "management-jwt".to_string()),
        )?;

        let provider_access_key = env::var("PROVIDER_ACCESS_KEY").ok().filter(|s| !s.is_empty());
        let provider_secret = env::var("PROVIDER_SECRET").ok().filter(|s| !s.is_empty());
        let provider_template_id =
            env::var("PROVIDER_TEMPLATE_ID").ok().filter(|s| !s.is_empty());
        let provider_api_base = env::var("PROVIDER_API_BASE_URL")
            .unwrap_or_else(|_| "https://api.100ms.live/v2".to_string());

        let access_token_ttl_secs = env::var("ACCESS_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse::<i64>()
            .map_err(|_| "ACCESS_TOKEN_TTL_SECS must be a valid integer")?;

        let notify_url = env::var("NOTIFY_URL").ok().filter(|s| !s.is_empty());

        Ok(Self {
            listen_addr,
            session_secret,
            directory_url,
            notify_url,
            backend,
            provider_access_key,
            provider_secret,
            provider_template_id,
            provider_api_base,
            access_token_ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_parses_into_backend() {
        assert_eq!(
            SigningBackend::parse("management-jwt").unwrap(),
            SigningBackend::ManagementJwt
        );
        assert_eq!(
            SigningBackend::parse("direct-jwt").unwrap(),
            SigningBackend::DirectJwt
        );
        assert_eq!(
            SigningBackend::parse("compact").unwrap(),
            SigningBackend::CompactHmac
        );
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let err = SigningBackend::parse("zeroconf").unwrap_err();
        assert!(err.contains("zeroconf"));
    }
}

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

//! Compact binary credential codec.
//!
//! A custom non-JWT wire format for constrained clients that should not need
//! a JWT library on the verifying side:
//!
//! ```text
//! [0x00][0x04][expire:u32 BE][digest_len:u16 BE][digest][payload_len:u16 BE][payload]
//! ```
//!
//! where `digest = HMAC-SHA256(secret, payload)` and `payload` is the UTF-8
//! JSON serialization of [`CompactClaims`]. The whole buffer is then
//! base64-encoded for transport. The digest covers the payload
//! byte-for-byte; expiry is enforced strictly with zero skew tolerance.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

use crate::claims::CompactClaims;

type HmacSha256 = Hmac<Sha256>;

/// Fixed magic/version prefix of the binary envelope.
pub const FORMAT_PREFIX: [u8; 2] = [0x00, 0x04];

/// Errors produced while encoding, decoding, or verifying a compact credential.
#[derive(Debug)]
pub enum CompactTokenError {
    /// The token is not well-formed (bad base64, truncated envelope,
    /// wrong prefix, or unparseable claims).
    Malformed(String),
    /// A field exceeds what the wire format can carry.
    Oversized(&'static str),
    /// Recomputing the HMAC over the payload did not reproduce the digest.
    SignatureMismatch,
    /// `expire` is not in the future.
    Expired,
}

impl fmt::Display for CompactTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompactTokenError::Malformed(msg) => write!(f, "malformed token: {msg}"),
            CompactTokenError::Oversized(field) => {
                write!(f, "{field} does not fit the wire format")
            }
            CompactTokenError::SignatureMismatch => write!(f, "digest verification failed"),
            CompactTokenError::Expired => write!(f, "credential has expired"),
        }
    }
}

impl std::error::Error for CompactTokenError {}

/// The raw `(expire, digest, payload)` triple recovered from the envelope,
/// plus the parsed claims.
#[derive(Debug)]
pub struct DecodedCompactToken {
    pub expire: u32,
    pub digest: Vec<u8>,
    pub payload: Vec<u8>,
    pub claims: CompactClaims,
}

/// Serialize, sign, and base64-encode a compact credential.
pub fn encode(claims: &CompactClaims, secret: &str) -> Result<String, CompactTokenError> {
    let payload =
        serde_json::to_vec(claims).map_err(|e| CompactTokenError::Malformed(e.to_string()))?;
    if payload.len() > u16::MAX as usize {
        return Err(CompactTokenError::Oversized("payload"));
    }
    let expire =
        u32::try_from(claims.expire).map_err(|_| CompactTokenError::Oversized("expire"))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CompactTokenError::Malformed(e.to_string()))?;
    mac.update(&payload);
    let digest = mac.finalize().into_bytes();

    let mut buf = Vec::with_capacity(2 + 4 + 2 + digest.len() + 2 + payload.len());
    buf.extend_from_slice(&FORMAT_PREFIX);
    buf.extend_from_slice(&expire.to_be_bytes());
    buf.extend_from_slice(&(digest.len() as u16).to_be_bytes());
    buf.extend_from_slice(&digest);
    buf.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    buf.extend_from_slice(&payload);

    Ok(STANDARD.encode(&buf))
}

/// Decode the envelope without verifying the digest or expiry.
pub fn decode(token: &str) -> Result<DecodedCompactToken, CompactTokenError> {
    let buf = STANDARD
        .decode(token)
        .map_err(|e| CompactTokenError::Malformed(e.to_string()))?;

    if buf.len() < 8 {
        return Err(CompactTokenError::Malformed("truncated envelope".into()));
    }
    if buf[0..2] != FORMAT_PREFIX {
        return Err(CompactTokenError::Malformed("bad magic/version".into()));
    }

    let expire = u32::from_be_bytes([buf[2], buf[3], buf[4], buf[5]]);
    let digest_len = u16::from_be_bytes([buf[6], buf[7]]) as usize;

    let digest_end = 8 + digest_len;
    if buf.len() < digest_end + 2 {
        return Err(CompactTokenError::Malformed("truncated digest".into()));
    }
    let digest = buf[8..digest_end].to_vec();

    let payload_len = u16::from_be_bytes([buf[digest_end], buf[digest_end + 1]]) as usize;
    let payload_start = digest_end + 2;
    if buf.len() != payload_start + payload_len {
        return Err(CompactTokenError::Malformed("payload length mismatch".into()));
    }
    let payload = buf[payload_start..].to_vec();

    let claims: CompactClaims =
        serde_json::from_slice(&payload).map_err(|e| CompactTokenError::Malformed(e.to_string()))?;

    Ok(DecodedCompactToken {
        expire,
        digest,
        payload,
        claims,
    })
}

/// Decode a credential, verify its digest against `secret`, and enforce
/// expiry against `now` (Unix seconds, zero skew tolerance).
pub fn verify(token: &str, secret: &str, now: i64) -> Result<CompactClaims, CompactTokenError> {
    let decoded = decode(token)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CompactTokenError::Malformed(e.to_string()))?;
    mac.update(&decoded.payload);
    mac.verify_slice(&decoded.digest)
        .map_err(|_| CompactTokenError::SignatureMismatch)?;

    if now >= decoded.claims.expire {
        return Err(CompactTokenError::Expired);
    }

    Ok(decoded.claims)
}

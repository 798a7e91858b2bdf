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

//! Caller identity as reported by the external role directory.

use serde::{Deserialize, Serialize};

/// The two roles that may join a consult call.
///
/// Role policy is evaluated exactly once, at the role-gate boundary;
/// everywhere else the role is carried as data inside a claim set.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Clinician,
    Patient,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Clinician => write!(f, "Clinician"),
            Role::Patient => write!(f, "Patient"),
        }
    }
}

/// An identity as the role directory reports it.
///
/// Read-only to this subsystem and never persisted here. `approved` is only
/// meaningful for clinicians: a clinician whose registration has not been
/// approved yet must not create rooms.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Identity {
    pub subject_id: String,
    pub role: Role,
    pub approved: bool,

    /// Human-readable name, used only for descriptive room names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_as_variant_name() {
        assert_eq!(
            serde_json::to_string(&Role::Clinician).unwrap(),
            "\"Clinician\""
        );
        assert_eq!(serde_json::to_string(&Role::Patient).unwrap(), "\"Patient\"");
    }

    #[test]
    fn identity_without_display_name_round_trips() {
        let json = r#"{"subject_id":"D-AB12C","role":"Clinician","approved":true}"#;
        let id: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(id.subject_id, "D-AB12C");
        assert_eq!(id.role, Role::Clinician);
        assert!(id.approved);
        assert!(id.display_name.is_none());
    }
}

// crates/cert-portal-core/src/model/role.rs
// ============================================================================
// Module: Cert Portal Roles
// Description: Platform role taxonomy for access control.
// Purpose: Provide the stable role labels that gate every protected view.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Roles are assigned by the backend and carried on every authenticated user
//! record. The role field is the sole authority for view access; clients
//! never derive or elevate roles locally.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Role Taxonomy
// ============================================================================

/// Platform role attached to an authenticated user.
///
/// # Invariants
/// - Variants are stable for serialization and access-control matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator managing schemes and assessors.
    Admin,
    /// Asesor (assessor) conducting competency evaluations.
    Asesor,
    /// Asesi (candidate) applying for certification.
    Asesi,
}

/// All roles recognized by the platform.
pub const ALL_ROLES: [Role; 3] = [Role::Admin, Role::Asesor, Role::Asesi];

impl Role {
    /// Returns the stable wire label for the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Asesor => "asesor",
            Self::Asesi => "asesi",
        }
    }

    /// Parses a wire label into a role (returns `None` for unknown labels).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Self::Admin),
            "asesor" => Some(Self::Asesor),
            "asesi" => Some(Self::Asesi),
            _ => None,
        }
    }

    /// Returns the dashboard route users with this role land on after login.
    #[must_use]
    pub const fn landing_route(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard/admin",
            Self::Asesor => "/dashboard/asesor",
            Self::Asesi => "/dashboard/asesi",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

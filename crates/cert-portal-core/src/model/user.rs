// crates/cert-portal-core/src/model/user.rs
// ============================================================================
// Module: Cert Portal User Records
// Description: Authenticated user account records.
// Purpose: Mirror the backend's user wire form including the access role.
// Dependencies: crate::model::{identifiers, role}, serde
// ============================================================================

//! ## Overview
//! A [`User`] is returned by the backend after login and from the current
//! session endpoint. The embedded [`Role`] drives every view access decision;
//! user records must be treated as untrusted input on deserialization.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::model::identifiers::UserId;
use crate::model::role::Role;

// ============================================================================
// SECTION: User Records
// ============================================================================

/// Authenticated platform user.
///
/// # Invariants
/// - `role` is assigned by the backend and is authoritative for access control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Access-control role.
    pub role: Role,
}
